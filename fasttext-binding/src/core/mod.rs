//! # Core Layer
//!
//! Error taxonomy, configuration and file validation shared by the C surface
//! and the safe client wrappers.

pub mod config_loader;
pub mod file_format;
pub mod unified_error;

pub use config_loader::{init_logging, BindingConfig, CONFIG_ENV_VAR};

pub use file_format::{
    check_model_header, check_vectors_header, open_model_file, validate_vectors_file, FileFormat,
    HeaderMismatch, ModelHeader, VectorsHeader, FASTTEXT_FILEFORMAT_MAGIC_INT32,
    FASTTEXT_VERSION,
};

pub use unified_error::{
    load_errors, BindingError, BindingResult, EngineError, ResultCode, RES_ERROR_NOT_INIT,
    RES_ERROR_NOT_OPEN, RES_ERROR_WRONG_MODEL, RES_OK,
};
