//! Binding Configuration Loader

use crate::core::unified_error::{load_errors, BindingError, BindingResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable pointing at a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "FASTTEXT_BINDING_CONFIG";

/// Initial buffer size used when reading a word back from the dictionary.
pub const DEFAULT_WORD_BUFFER_CAPACITY: usize = 256;

/// Process-level settings for the binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Starting capacity of the bounded buffer used by `Dictionary::get_word`
    pub word_buffer_capacity: usize,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            word_buffer_capacity: DEFAULT_WORD_BUFFER_CAPACITY,
        }
    }
}

impl BindingConfig {
    /// Load and parse a JSON configuration file; missing fields fall back to
    /// their defaults.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;

        let config: BindingConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        anyhow::ensure!(
            config.word_buffer_capacity > 0,
            "word_buffer_capacity must be positive"
        );

        Ok(config)
    }

    /// Resolve the configuration: an explicit path wins, then the path named by
    /// [`CONFIG_ENV_VAR`], then defaults.
    ///
    /// An unreadable file maps to [`BindingError::NotOpen`], anything else to
    /// [`BindingError::Config`].
    pub fn resolve(explicit: Option<&Path>) -> BindingResult<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR);
        let path = explicit.or_else(|| from_env.as_deref().map(Path::new));

        match path {
            Some(path) => Self::load_from_path(path).map_err(|e| {
                let message = format!("{:#}", e);
                match e.downcast::<std::io::Error>() {
                    Ok(io) => load_errors::not_open(&path.to_string_lossy(), io),
                    Err(_) => BindingError::Config { message },
                }
            }),
            None => Ok(Self::default()),
        }
    }
}

/// Install the global logger.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Returns `false` when a
/// logger was already installed, which is not an error; the configured level
/// is then applied to the global max level so it still takes effect.
pub fn init_logging(config: &BindingConfig) -> bool {
    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    if env_logger::Builder::from_env(env).try_init().is_ok() {
        return true;
    }

    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_none() {
        log::set_max_level(
            config
                .log_level
                .parse::<log::LevelFilter>()
                .unwrap_or(log::LevelFilter::Info),
        );
    }
    false
}
