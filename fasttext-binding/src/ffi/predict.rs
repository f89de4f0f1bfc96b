//! Prediction Result Aggregation
//!
//! A result is built in three phases: [`PredictResultBuilder::with_len`]
//! allocates one slot per prediction, [`PredictResultBuilder::set`] fills the
//! slots in engine order, and [`PredictResultBuilder::finish`] consumes the
//! builder, points every record at its word and publishes the record array.
//! Once finished, a [`PredictResultHandle`] is read-only, so the word pointers
//! captured at finish time stay valid until the handle is released.

use crate::ffi::string::c_string_lossy;
use crate::ffi::types::PredictRecord;
use libc::{c_char, c_int};
use std::ffi::{CStr, CString};

/// Returned by `prdct_error` for successful results.
static EMPTY_ERROR: &[u8] = b"\0";

/// Message used when an engine fails without saying why.
pub const UNKNOWN_ENGINE_FAILURE: &str = "engine failure";

/// Mutable staging area for a successful prediction
#[derive(Debug)]
pub struct PredictResultBuilder {
    scores: Vec<f32>,
    words: Vec<CString>,
}

impl PredictResultBuilder {
    /// Resize phase: exactly `len` empty slots.
    pub fn with_len(len: usize) -> Self {
        PredictResultBuilder {
            scores: vec![0.0; len],
            words: vec![CString::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Populate phase: store one prediction at `index`.
    ///
    /// Returns `false` and leaves the builder untouched when `index` is out of
    /// range.
    pub fn set(&mut self, index: usize, score: f32, word: &str) -> bool {
        match (self.scores.get_mut(index), self.words.get_mut(index)) {
            (Some(slot_score), Some(slot_word)) => {
                *slot_score = score;
                *slot_word = c_string_lossy(word);
                true
            }
            _ => false,
        }
    }

    /// Finalize phase: freeze the words and publish the record array.
    pub fn finish(self) -> PredictResultHandle {
        let words = self.words.into_boxed_slice();
        // CString contents live in their own heap allocations, so these
        // pointers survive moving `words` into the handle.
        let records: Box<[PredictRecord]> = self
            .scores
            .iter()
            .zip(words.iter())
            .map(|(&predict, word)| PredictRecord {
                predict,
                word: word.as_ptr(),
            })
            .collect();

        PredictResultHandle {
            records,
            words,
            error: None,
        }
    }
}

/// Ranked predictions or a captured engine failure, never both
#[derive(Debug)]
pub struct PredictResultHandle {
    records: Box<[PredictRecord]>,
    // Backing storage for `records[i].word`; never mutated after finish
    words: Box<[CString]>,
    error: Option<CString>,
}

impl PredictResultHandle {
    /// Failure state carrying `message` and no records.
    pub fn failure(message: &str) -> Self {
        let message = if message.is_empty() {
            UNKNOWN_ENGINE_FAILURE
        } else {
            message
        };
        PredictResultHandle {
            records: Box::default(),
            words: Box::default(),
            error: Some(c_string_lossy(message)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn records(&self) -> &[PredictRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&CStr> {
        self.error.as_deref()
    }

    /// `(score, word)` pairs in engine order.
    pub fn entries(&self) -> impl Iterator<Item = (f32, &CStr)> + '_ {
        self.records
            .iter()
            .zip(self.words.iter())
            .map(|(record, word)| (record.predict, word.as_c_str()))
    }

    /// Move onto the heap and hand ownership to the host.
    pub fn into_raw(self) -> *mut PredictResultHandle {
        Box::into_raw(Box::new(self))
    }
}

/// Number of records; `0` for a failed prediction
///
/// # Safety
/// - `result` must be a live handle returned by this library
#[no_mangle]
pub unsafe extern "C" fn prdct_len(result: *const PredictResultHandle) -> c_int {
    if result.is_null() {
        return 0;
    }
    let result = unsafe { &*result };
    c_int::try_from(result.len()).unwrap_or(c_int::MAX)
}

/// Pointer to the first record, or null when there are none
///
/// # Safety
/// - `result` must be a live handle returned by this library
#[no_mangle]
pub unsafe extern "C" fn prdct_records(result: *const PredictResultHandle) -> *const PredictRecord {
    if result.is_null() {
        return std::ptr::null();
    }
    let result = unsafe { &*result };
    if result.is_empty() {
        std::ptr::null()
    } else {
        result.records().as_ptr()
    }
}

/// Error message of a failed prediction, or an empty string on success
///
/// # Safety
/// - `result` must be a live handle returned by this library
#[no_mangle]
pub unsafe extern "C" fn prdct_error(result: *const PredictResultHandle) -> *const c_char {
    if result.is_null() {
        return EMPTY_ERROR.as_ptr() as *const c_char;
    }
    let result = unsafe { &*result };
    match result.error() {
        Some(message) => message.as_ptr(),
        None => EMPTY_ERROR.as_ptr() as *const c_char,
    }
}

/// Free the records, their words and the handle
///
/// # Safety
/// - `result` must be null or a handle not released before
#[no_mangle]
pub unsafe extern "C" fn prdct_release(result: *mut PredictResultHandle) {
    if !result.is_null() {
        unsafe {
            drop(Box::from_raw(result));
        }
    }
}
