//! FFI Initialization Functions

use crate::core::config_loader::{init_logging, BindingConfig};
use crate::core::unified_error::{ResultCode, RES_ERROR_NOT_OPEN};
use libc::{c_char, c_int};
use std::ffi::CStr;
use std::path::Path;
use std::sync::OnceLock;

// Configuration applied by the first successful `fasttext_binding_init`
static BINDING_CONFIG: OnceLock<BindingConfig> = OnceLock::new();

/// Active configuration, or defaults when the binding was never initialized.
pub fn active_config() -> BindingConfig {
    BINDING_CONFIG.get().cloned().unwrap_or_default()
}

/// Resolve the configuration and install the logger.
///
/// The logger is installed only once a configuration resolves. Later calls
/// after a successful one keep the first configuration.
pub fn init_binding(config_path: Option<&Path>) -> Result<&'static BindingConfig, ResultCode> {
    if let Some(config) = BINDING_CONFIG.get() {
        return Ok(config);
    }

    match BindingConfig::resolve(config_path) {
        Ok(config) => {
            init_logging(&config);
            let config = BINDING_CONFIG.get_or_init(|| config);
            log::info!(
                "fasttext binding initialized (log level {}, word buffer {})",
                config.log_level,
                config.word_buffer_capacity
            );
            Ok(config)
        }
        Err(err) => {
            // no logger yet; a later successful init installs it at its level
            log::error!("fasttext binding initialization failed: {}", err);
            Err(err.code())
        }
    }
}

/// Load the optional JSON configuration and initialize logging
///
/// `config_path` may be null, in which case `FASTTEXT_BINDING_CONFIG` is
/// consulted and defaults apply when it is unset. Returns 0 on success, 1 if
/// the file cannot be read, 2 if it cannot be parsed.
///
/// # Safety
/// - `config_path` must be null or a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn fasttext_binding_init(config_path: *const c_char) -> c_int {
    let path = if config_path.is_null() {
        None
    } else {
        match unsafe { CStr::from_ptr(config_path) }.to_str() {
            Ok(path) => Some(Path::new(path)),
            Err(_) => return RES_ERROR_NOT_OPEN,
        }
    };

    match init_binding(path) {
        Ok(_) => ResultCode::Ok.as_c_int(),
        Err(code) => code.as_c_int(),
    }
}
