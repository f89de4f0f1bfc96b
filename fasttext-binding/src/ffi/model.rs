//! Model Handle Functions
//!
//! The model handle owns one engine instance. Loading goes through the file
//! validators first; prediction is the single call path that traps engine
//! failures and turns them into an error string on the result handle.
//! Vector production and dictionary lookups translate nothing.

use crate::core::file_format::{open_model_file, validate_vectors_file};
use crate::core::unified_error::{
    load_errors, BindingResult, EngineError, ResultCode, RES_ERROR_NOT_OPEN,
};
use crate::engine::{create_engine, Engine, Vocabulary};
use crate::ffi::dictionary::DictionaryHandle;
use crate::ffi::predict::{PredictResultBuilder, PredictResultHandle};
use crate::ffi::string::str_from_c;
use crate::ffi::vector::VectorHandle;
use libc::{c_char, c_int};
use std::any::Any;
use std::ffi::CStr;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Lifecycle of a model handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Created, nothing loaded
    Uninitialized,
    /// Model file loaded
    Loaded,
    /// Model file and text vectors loaded
    VectorsLoaded,
    /// The engine failed part-way through a load; the handle is unusable
    Failed,
}

/// Owning wrapper around one engine instance
pub struct ModelHandle {
    engine: Box<dyn Engine>,
    state: ModelState,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("state", &self.state)
            .field("dimension", &self.dimension())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "engine panicked".to_string()
    }
}

impl ModelHandle {
    pub fn with_engine(engine: Box<dyn Engine>) -> Self {
        ModelHandle {
            engine,
            state: ModelState::Uninitialized,
        }
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    /// Embedding dimension; `0` until a model is loaded.
    pub fn dimension(&self) -> i32 {
        match self.state {
            ModelState::Loaded | ModelState::VectorsLoaded => self.engine.dimension().max(0),
            ModelState::Uninitialized | ModelState::Failed => 0,
        }
    }

    /// Loaded and exposing a vocabulary.
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, ModelState::Loaded | ModelState::VectorsLoaded)
            && self.engine.dictionary().is_some()
    }

    /// Validate the header of `path`, then let the engine read the rest.
    ///
    /// A missing file or a rejected header leaves the handle untouched; an
    /// engine failure after the header moves it to [`ModelState::Failed`].
    pub fn load_model(&mut self, path: &Path) -> BindingResult<()> {
        let format = self.engine.file_format();
        let mut reader = open_model_file(path, format)?;

        if let Err(err) = self.engine.load_model(&mut reader) {
            self.state = ModelState::Failed;
            log::error!("engine failed to load model {}: {}", path.display(), err);
            return Err(load_errors::engine_failure("load model", &err));
        }

        self.state = ModelState::Loaded;
        log::debug!(
            "loaded model {} (dimension {})",
            path.display(),
            self.dimension()
        );
        Ok(())
    }

    /// Validate the `.vec` header of `path` against the model dimension, then
    /// let the engine load the vectors.
    pub fn load_vectors(&mut self, path: &Path) -> BindingResult<()> {
        if !self.is_initialized() {
            return Err(load_errors::not_initialized("load vectors"));
        }

        let header = validate_vectors_file(path, i64::from(self.dimension()))?;

        if let Err(err) = self.engine.load_vectors(path) {
            self.state = ModelState::Failed;
            log::error!("engine failed to load vectors {}: {}", path.display(), err);
            return Err(load_errors::engine_failure("load vectors", &err));
        }

        self.state = ModelState::VectorsLoaded;
        log::debug!(
            "loaded {} vectors of dimension {} from {}",
            header.rows,
            header.dim,
            path.display()
        );
        Ok(())
    }

    /// Vocabulary of the loaded model.
    pub fn vocabulary(&self) -> Option<&dyn Vocabulary> {
        if self.is_initialized() {
            self.engine.dictionary()
        } else {
            None
        }
    }

    pub fn word_vector(&self, word: &str) -> VectorHandle {
        let mut vector = VectorHandle::zeroed(self.dimension() as usize);
        self.engine.word_vector(word, vector.as_mut_slice());
        vector
    }

    pub fn sentence_vector(&self, text: &str) -> VectorHandle {
        let mut vector = VectorHandle::zeroed(self.dimension() as usize);
        self.engine.sentence_vector(text, vector.as_mut_slice());
        vector
    }

    /// Top-`k` predictions for `text`.
    ///
    /// Engine errors and panics are captured into a failed result instead of
    /// propagating.
    pub fn predict(&self, text: &str, k: i32) -> PredictResultHandle {
        let engine = &self.engine;
        let outcome = panic::catch_unwind(AssertUnwindSafe(
            || -> Result<PredictResultHandle, EngineError> {
                let predictions = engine.predict(text, k)?;

                let mut builder = PredictResultBuilder::with_len(predictions.len());
                for (i, (score, word)) in predictions.iter().enumerate() {
                    builder.set(i, *score, word);
                }
                Ok(builder.finish())
            },
        ));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                log::error!("prediction failed: {}", err);
                PredictResultHandle::failure(err.message())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("engine panicked during prediction: {}", message);
                PredictResultHandle::failure(&message)
            }
        }
    }

    /// Move onto the heap and hand ownership to the host.
    pub fn into_raw(self) -> *mut ModelHandle {
        Box::into_raw(Box::new(self))
    }
}

/// Interpret a C path argument; `None` for null or non-UTF-8 input.
unsafe fn path_from_c<'a>(path: *const c_char) -> Option<&'a Path> {
    if path.is_null() {
        return None;
    }
    CStr::from_ptr(path).to_str().ok().map(Path::new)
}

fn report(operation: &str, result: BindingResult<()>) -> c_int {
    match result {
        Ok(()) => ResultCode::Ok.as_c_int(),
        Err(err) => {
            log::warn!("{} rejected: {}", operation, err);
            err.code().as_c_int()
        }
    }
}

/// Create a model handle around an engine built by the caller.
///
/// This is the Rust-side entry point for hosts that link an engine directly.
pub fn ft_new_with_engine(engine: Box<dyn Engine>) -> *mut ModelHandle {
    let handle = ModelHandle::with_engine(engine).into_raw();
    log::debug!("created model handle {:p}", handle);
    handle
}

/// Create an empty model handle using the registered engine factory
///
/// Returns null when no engine factory has been registered.
#[no_mangle]
pub extern "C" fn ft_new() -> *mut ModelHandle {
    match create_engine() {
        Some(engine) => ft_new_with_engine(engine),
        None => {
            log::error!("ft_new called before an engine factory was registered");
            std::ptr::null_mut()
        }
    }
}

/// Load a binary model file
///
/// Returns 0 on success, 1 if the file cannot be opened, 2 if its header does
/// not match the engine's format.
///
/// # Safety
/// - `model` must be a live handle returned by `ft_new`
/// - `path` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn ft_load_model(model: *mut ModelHandle, path: *const c_char) -> c_int {
    if model.is_null() {
        return ResultCode::NotInitialized.as_c_int();
    }
    let Some(path) = (unsafe { path_from_c(path) }) else {
        log::warn!("load model rejected: path is null or not UTF-8");
        return RES_ERROR_NOT_OPEN;
    };
    let model = unsafe { &mut *model };
    report("load model", model.load_model(path))
}

/// Load a text vectors file into an already loaded model
///
/// Returns 0 on success, 1 if the file cannot be opened, 2 if its dimension
/// differs from the model's, 3 if no model was loaded first.
///
/// # Safety
/// - `model` must be a live handle returned by `ft_new`
/// - `path` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn ft_load_vectors(model: *mut ModelHandle, path: *const c_char) -> c_int {
    if model.is_null() {
        return ResultCode::NotInitialized.as_c_int();
    }
    let model = unsafe { &mut *model };
    if !model.is_initialized() {
        return report(
            "load vectors",
            Err(load_errors::not_initialized("load vectors")),
        );
    }
    let Some(path) = (unsafe { path_from_c(path) }) else {
        log::warn!("load vectors rejected: path is null or not UTF-8");
        return RES_ERROR_NOT_OPEN;
    };
    report("load vectors", model.load_vectors(path))
}

/// Embedding dimension of the loaded model, 0 before loading
///
/// # Safety
/// - `model` must be a live handle returned by `ft_new`
#[no_mangle]
pub unsafe extern "C" fn ft_get_dimension(model: *const ModelHandle) -> c_int {
    if model.is_null() {
        return 0;
    }
    unsafe { (*model).dimension() }
}

/// Borrow the model's vocabulary
///
/// Returns null when the model is not loaded. The handle must not be used
/// after the model is released.
///
/// # Safety
/// - `model` must be a live handle returned by `ft_new`
#[no_mangle]
pub unsafe extern "C" fn ft_get_dictionary(model: *const ModelHandle) -> *mut DictionaryHandle {
    if model.is_null() {
        return std::ptr::null_mut();
    }
    let model = unsafe { &*model };
    match model.vocabulary() {
        Some(vocabulary) => unsafe { DictionaryHandle::borrow(vocabulary) }.into_raw(),
        None => {
            log::warn!("dictionary requested from a model that is not loaded");
            std::ptr::null_mut()
        }
    }
}

/// Vector of a single word
///
/// # Safety
/// - `model` must be a live handle returned by `ft_new`
/// - `word` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn ft_get_word_vector(
    model: *const ModelHandle,
    word: *const c_char,
) -> *mut VectorHandle {
    if model.is_null() {
        return std::ptr::null_mut();
    }
    unsafe {
        let word = str_from_c(word);
        (*model).word_vector(&word).into_raw()
    }
}

/// Vector of a whole sentence
///
/// # Safety
/// - `model` must be a live handle returned by `ft_new`
/// - `text` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn ft_get_sentence_vector(
    model: *const ModelHandle,
    text: *const c_char,
) -> *mut VectorHandle {
    if model.is_null() {
        return std::ptr::null_mut();
    }
    unsafe {
        let text = str_from_c(text);
        (*model).sentence_vector(&text).into_raw()
    }
}

/// Top-`k` predictions for `text`
///
/// Never returns null. Check `prdct_error` before reading records: a failed
/// prediction carries the engine's message and no records.
///
/// # Safety
/// - `model` must be a live handle returned by `ft_new`
/// - `text` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn ft_predict(
    model: *const ModelHandle,
    text: *const c_char,
    k: c_int,
) -> *mut PredictResultHandle {
    if model.is_null() {
        return PredictResultHandle::failure("model handle is null").into_raw();
    }
    if text.is_null() {
        return PredictResultHandle::failure("text is null").into_raw();
    }
    let model = unsafe { &*model };
    let text = match unsafe { CStr::from_ptr(text) }.to_str() {
        Ok(text) => text,
        Err(e) => {
            return PredictResultHandle::failure(&format!("text is not valid UTF-8: {}", e))
                .into_raw()
        }
    };
    model.predict(text, k).into_raw()
}

/// Release the model and its engine
///
/// Dictionary handles taken from this model become invalid.
///
/// # Safety
/// - `model` must be null or a handle not released before
#[no_mangle]
pub unsafe extern "C" fn ft_release(model: *mut ModelHandle) {
    if !model.is_null() {
        log::debug!("releasing model handle {:p}", model);
        unsafe {
            drop(Box::from_raw(model));
        }
    }
}
