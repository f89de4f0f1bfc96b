//! Owned model

use crate::client::dictionary::Dictionary;
use crate::client::predict::Predict;
use crate::client::vector::Vector;
use crate::core::unified_error::ResultCode;
use crate::engine::Engine;
use crate::ffi::model::{
    ft_get_dictionary, ft_get_dimension, ft_get_sentence_vector, ft_get_word_vector,
    ft_load_model, ft_load_vectors, ft_new, ft_predict, ft_release, ModelHandle, ModelState,
};
use crate::ffi::predict::PredictResultHandle;
use crate::ffi::string::c_string_lossy;
use libc::c_int;
use std::ffi::CString;
use std::path::Path;
use std::ptr::NonNull;

fn c_path(path: &Path) -> Result<CString, ResultCode> {
    let path = path.to_str().ok_or(ResultCode::NotOpen)?;
    CString::new(path).map_err(|_| ResultCode::NotOpen)
}

fn to_result(code: c_int) -> Result<(), ResultCode> {
    ResultCode::from_c_int(code)
        .unwrap_or(ResultCode::WrongModel)
        .into_result()
}

/// Model handle released on drop
#[derive(Debug)]
pub struct FastText {
    handle: NonNull<ModelHandle>,
}

impl FastText {
    /// Empty model backed by the registered engine factory; `None` when no
    /// factory was registered.
    pub fn new() -> Option<FastText> {
        NonNull::new(ft_new()).map(|handle| FastText { handle })
    }

    /// Empty model around an engine supplied by the caller.
    pub fn with_engine(engine: Box<dyn Engine>) -> FastText {
        let handle = Box::leak(Box::new(ModelHandle::with_engine(engine)));
        FastText {
            handle: NonNull::from(handle),
        }
    }

    pub fn load_model(&mut self, model_path: &Path) -> Result<(), ResultCode> {
        let path = c_path(model_path)?;
        to_result(unsafe { ft_load_model(self.handle.as_ptr(), path.as_ptr()) })
    }

    pub fn load_vectors(&mut self, vectors_path: &Path) -> Result<(), ResultCode> {
        let path = c_path(vectors_path)?;
        to_result(unsafe { ft_load_vectors(self.handle.as_ptr(), path.as_ptr()) })
    }

    pub fn dimension(&self) -> i32 {
        unsafe { ft_get_dimension(self.handle.as_ptr()) }
    }

    pub fn state(&self) -> ModelState {
        unsafe { self.handle.as_ref() }.state()
    }

    /// Vocabulary view, `None` before a model is loaded.
    pub fn get_dictionary(&self) -> Option<Dictionary<'_>> {
        unsafe { Dictionary::from_raw(ft_get_dictionary(self.handle.as_ptr())) }
    }

    pub fn word_vector(&self, word: &str) -> Option<Vector> {
        let word = c_string_lossy(word);
        unsafe { Vector::from_raw(ft_get_word_vector(self.handle.as_ptr(), word.as_ptr())) }
    }

    pub fn sentence_vector(&self, text: &str) -> Option<Vector> {
        let text = c_string_lossy(text);
        unsafe { Vector::from_raw(ft_get_sentence_vector(self.handle.as_ptr(), text.as_ptr())) }
    }

    /// Top-`k` predictions; engine failures surface through [`Predict::err`].
    pub fn predict(&self, text: &str, k: i32) -> Predict {
        let text = c_string_lossy(text);
        let raw = unsafe { ft_predict(self.handle.as_ptr(), text.as_ptr(), k) };
        unsafe { Predict::from_raw(raw) }.unwrap_or_else(|| {
            Predict::from_result(PredictResultHandle::failure("prediction returned no result"))
        })
    }
}

impl Drop for FastText {
    fn drop(&mut self) {
        unsafe { ft_release(self.handle.as_ptr()) };
    }
}
