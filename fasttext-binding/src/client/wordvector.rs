//! Word-vector model helper

use crate::client::fasttext::FastText;
use crate::core::unified_error::ResultCode;
use crate::engine::Engine;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Minimal lookup surface shared by word-vector models
pub trait WordVectorModel {
    fn word_index(&self, word: &str) -> Option<i64>;

    fn word_to_vector(&self, word: &str) -> Option<Vec<f32>>;

    fn sentence_to_vector(&self, text: &str) -> Option<Vec<f32>>;
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

impl FastText {
    /// Load `<base>.bin` and `<base>.vec` into a model from the registered
    /// engine factory.
    pub fn with_model(base: &Path) -> Result<FastText, ResultCode> {
        let mut model = FastText::new().ok_or(ResultCode::NotInitialized)?;
        model.load_base(base)?;
        Ok(model)
    }

    /// Same as [`FastText::with_model`] with a caller-supplied engine.
    pub fn with_engine_and_model(engine: Box<dyn Engine>, base: &Path) -> Result<FastText, ResultCode> {
        let mut model = FastText::with_engine(engine);
        model.load_base(base)?;
        Ok(model)
    }

    fn load_base(&mut self, base: &Path) -> Result<(), ResultCode> {
        let model_path = with_suffix(base, ".bin");
        let vectors_path = with_suffix(base, ".vec");

        self.load_model(&model_path)?;
        self.load_vectors(&vectors_path)?;
        log::debug!("loaded word-vector model {}", base.display());
        Ok(())
    }
}

impl WordVectorModel for FastText {
    fn word_index(&self, word: &str) -> Option<i64> {
        self.get_dictionary()?.word_index(word)
    }

    fn word_to_vector(&self, word: &str) -> Option<Vec<f32>> {
        self.word_vector(word).map(|vector| vector.to_vec())
    }

    fn sentence_to_vector(&self, text: &str) -> Option<Vec<f32>> {
        self.sentence_vector(text).map(|vector| vector.to_vec())
    }
}
