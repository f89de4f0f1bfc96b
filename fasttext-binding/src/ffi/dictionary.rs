//! Dictionary Handle Functions
//!
//! A dictionary handle is a borrowed view into the vocabulary owned by a model
//! handle. It holds no ownership: releasing the model invalidates every
//! dictionary handle taken from it, and releasing a dictionary handle frees
//! only the handle itself.

use crate::engine::{Vocabulary, UNKNOWN_WORD_ID};
use crate::ffi::string::str_from_c;
use crate::ffi::types::WrapperString;
use libc::{c_char, c_int};
use std::ptr::NonNull;

#[derive(Debug)]
pub struct DictionaryHandle {
    vocabulary: NonNull<dyn Vocabulary>,
}

impl DictionaryHandle {
    /// Borrow `vocabulary` without tying the handle to its lifetime.
    ///
    /// # Safety
    /// - The owner of `vocabulary` must stay alive and unmodified for as long
    ///   as the handle is used
    pub unsafe fn borrow(vocabulary: &dyn Vocabulary) -> Self {
        let vocabulary: &'static dyn Vocabulary =
            std::mem::transmute::<&dyn Vocabulary, &'static dyn Vocabulary>(vocabulary);
        DictionaryHandle {
            vocabulary: NonNull::from(vocabulary),
        }
    }

    /// # Safety
    /// - The model this handle was taken from must still be alive
    pub unsafe fn vocabulary(&self) -> &dyn Vocabulary {
        self.vocabulary.as_ref()
    }

    /// Move onto the heap and hand ownership to the host.
    pub fn into_raw(self) -> *mut DictionaryHandle {
        Box::into_raw(Box::new(self))
    }
}

/// Id of `word`, or `-1` when the word is unknown
///
/// # Safety
/// - `dict` must be a live handle whose model is still alive
/// - `word` must be a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn dict_find(dict: *const DictionaryHandle, word: *const c_char) -> c_int {
    if dict.is_null() || word.is_null() {
        return UNKNOWN_WORD_ID;
    }
    unsafe {
        let word = str_from_c(word);
        (*dict).vocabulary().word_id(&word)
    }
}

/// Copy the word stored at `id` into the caller's buffer
///
/// `out.len` receives the full word length, which exceeds `out.cap` when the
/// copy was truncated.
///
/// # Safety
/// - `dict` must be a live handle whose model is still alive
/// - `out` must point to a `WrapperString` whose `str` holds `cap` writable bytes
#[no_mangle]
pub unsafe extern "C" fn dict_get_word(dict: *const DictionaryHandle, id: c_int, out: *mut WrapperString) {
    if dict.is_null() || out.is_null() {
        return;
    }
    unsafe {
        let word = (*dict).vocabulary().word(id);
        (*out).write(word);
    }
}

/// Number of words in the vocabulary
///
/// # Safety
/// - `dict` must be a live handle whose model is still alive
#[no_mangle]
pub unsafe extern "C" fn dict_words_count(dict: *const DictionaryHandle) -> c_int {
    if dict.is_null() {
        return 0;
    }
    unsafe { (*dict).vocabulary().nwords() }
}

/// Free the handle; the vocabulary itself belongs to the model
///
/// # Safety
/// - `dict` must be null or a handle not released before
#[no_mangle]
pub unsafe extern "C" fn dict_release(dict: *mut DictionaryHandle) {
    if !dict.is_null() {
        unsafe {
            drop(Box::from_raw(dict));
        }
    }
}
