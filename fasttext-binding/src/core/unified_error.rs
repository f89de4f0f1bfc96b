//! Unified Error Handling System
//!
//! Every fallible boundary call reports one of a closed set of integer
//! [`ResultCode`]s. Inside the crate the richer [`BindingError`] carries the
//! path, operation and underlying cause, and collapses onto a code right
//! before crossing the C boundary.

use std::ffi::c_int;
use thiserror::Error;

/// Result codes shared by every fallible C entry point.
///
/// The integer values are part of the ABI and must never change.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ResultCode {
    #[error("success")]
    Ok = 0,
    #[error("file could not be opened")]
    NotOpen = 1,
    #[error("file header does not match the expected model format")]
    WrongModel = 2,
    #[error("operation attempted before the model was initialized")]
    NotInitialized = 3,
}

pub const RES_OK: c_int = ResultCode::Ok as c_int;
pub const RES_ERROR_NOT_OPEN: c_int = ResultCode::NotOpen as c_int;
pub const RES_ERROR_WRONG_MODEL: c_int = ResultCode::WrongModel as c_int;
pub const RES_ERROR_NOT_INIT: c_int = ResultCode::NotInitialized as c_int;

impl ResultCode {
    pub fn as_c_int(self) -> c_int {
        self as c_int
    }

    /// Map a raw code back onto the taxonomy; unknown codes yield `None`.
    pub fn from_c_int(code: c_int) -> Option<Self> {
        match code {
            RES_OK => Some(ResultCode::Ok),
            RES_ERROR_NOT_OPEN => Some(ResultCode::NotOpen),
            RES_ERROR_WRONG_MODEL => Some(ResultCode::WrongModel),
            RES_ERROR_NOT_INIT => Some(ResultCode::NotInitialized),
            _ => None,
        }
    }

    /// `Ok(())` for [`ResultCode::Ok`], the code itself otherwise.
    pub fn into_result(self) -> Result<(), ResultCode> {
        match self {
            ResultCode::Ok => Ok(()),
            err => Err(err),
        }
    }
}

/// Error reported by an [`Engine`](crate::engine::Engine) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        EngineError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<String> for EngineError {
    fn from(message: String) -> Self {
        EngineError(message)
    }
}

impl From<&str> for EngineError {
    fn from(message: &str) -> Self {
        EngineError(message.to_string())
    }
}

/// Unified error type for all binding operations
#[derive(Debug, Error)]
pub enum BindingError {
    /// The requested file could not be opened
    #[error("cannot open '{path}': {source}")]
    NotOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Header or dimension mismatch with the expected model format
    #[error("wrong model file '{path}': {reason}")]
    WrongModel { path: String, reason: String },

    /// Sequencing violation, e.g. loading vectors before a model
    #[error("'{operation}' requires a loaded model")]
    NotInitialized { operation: String },

    /// Failure reported (or panic raised) by the engine
    #[error("engine failure during '{operation}': {message}")]
    Engine { operation: String, message: String },

    /// Configuration file could not be read or parsed
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl BindingError {
    /// Collapse onto the ABI result code.
    ///
    /// Engine failures only surface through load paths, which report them as
    /// a model mismatch. Configuration errors surface through
    /// `fasttext_binding_init`, which reports them the same way.
    pub fn code(&self) -> ResultCode {
        match self {
            BindingError::NotOpen { .. } => ResultCode::NotOpen,
            BindingError::WrongModel { .. } => ResultCode::WrongModel,
            BindingError::NotInitialized { .. } => ResultCode::NotInitialized,
            BindingError::Engine { .. } | BindingError::Config { .. } => ResultCode::WrongModel,
        }
    }
}

/// Result type alias for unified error handling
pub type BindingResult<T> = Result<T, BindingError>;

/// Predefined error builders for common scenarios
pub mod load_errors {
    use super::*;

    pub fn not_open(path: &str, source: std::io::Error) -> BindingError {
        BindingError::NotOpen {
            path: path.to_string(),
            source,
        }
    }

    pub fn wrong_model(path: &str, reason: impl Into<String>) -> BindingError {
        BindingError::WrongModel {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_initialized(operation: &str) -> BindingError {
        BindingError::NotInitialized {
            operation: operation.to_string(),
        }
    }

    pub fn engine_failure(operation: &str, err: &EngineError) -> BindingError {
        BindingError::Engine {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}
