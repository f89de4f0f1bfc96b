//! # Engine Seam
//!
//! The binding never computes embeddings or predictions itself. It drives an
//! [`Engine`] through the operations below and only owns the marshaling around
//! them. The engine used by the C constructor `ft_new` is produced by a
//! factory registered once per process.

use crate::core::file_format::FileFormat;
use crate::core::unified_error::EngineError;
use std::io::BufRead;
use std::path::Path;
use std::sync::OnceLock;

/// A `(score, label)` pair as ranked by the engine.
pub type Prediction = (f32, String);

/// Id returned by [`Vocabulary::word_id`] for an unknown word.
pub const UNKNOWN_WORD_ID: i32 = -1;

/// Word ↔ id mapping owned by a loaded engine
pub trait Vocabulary {
    /// Id of `word`, or [`UNKNOWN_WORD_ID`] when absent.
    fn word_id(&self, word: &str) -> i32;

    /// Word stored at `id`. Range checking is up to the implementation.
    fn word(&self, id: i32) -> &str;

    fn nwords(&self) -> i32;
}

/// Native text-embedding and classification engine
pub trait Engine {
    /// Header constants accepted by [`Engine::load_model`].
    fn file_format(&self) -> FileFormat {
        FileFormat::FASTTEXT
    }

    /// Continue deserializing a model whose header has already been consumed
    /// and validated.
    fn load_model(&mut self, reader: &mut dyn BufRead) -> Result<(), EngineError>;

    /// Replace input vectors from a text `.vec` file whose header has been
    /// validated against [`Engine::dimension`].
    fn load_vectors(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Embedding dimension; `0` before a model is loaded.
    fn dimension(&self) -> i32;

    /// Vocabulary of the loaded model, if any.
    fn dictionary(&self) -> Option<&dyn Vocabulary>;

    /// Fill `out` (already sized to [`Engine::dimension`]) with the vector of a
    /// single token.
    fn word_vector(&self, word: &str, out: &mut [f32]);

    /// Fill `out` with the embedding of a whole sentence.
    fn sentence_vector(&self, text: &str, out: &mut [f32]);

    /// Top-`k` labels for `text`, best first.
    fn predict(&self, text: &str, k: i32) -> Result<Vec<Prediction>, EngineError>;
}

/// Constructor for the engine behind every `ft_new` handle
pub type EngineFactory = fn() -> Box<dyn Engine>;

static ENGINE_FACTORY: OnceLock<EngineFactory> = OnceLock::new();

/// Register the process-wide engine factory.
///
/// Returns `false` if a factory was already registered; the first one stays.
pub fn register_engine_factory(factory: EngineFactory) -> bool {
    let registered = ENGINE_FACTORY.set(factory).is_ok();
    if !registered {
        log::warn!("engine factory already registered, keeping the first one");
    }
    registered
}

pub fn is_engine_registered() -> bool {
    ENGINE_FACTORY.get().is_some()
}

/// Build a fresh engine from the registered factory.
pub fn create_engine() -> Option<Box<dyn Engine>> {
    ENGINE_FACTORY.get().map(|factory| factory())
}
