//! Owned prediction result

use crate::ffi::predict::{prdct_error, prdct_len, prdct_records, prdct_release, PredictResultHandle};
use std::ffi::CStr;
use std::ptr::NonNull;

/// Score tolerance used when comparing records.
const EPS: f32 = 1e-6;

/// One `(score, label)` pair borrowed from a [`Predict`]
#[derive(Debug, Clone, Copy)]
pub struct PredictRecord<'a>(f32, &'a str);

impl<'a> PredictRecord<'a> {
    pub fn new(prediction: f32, word: &'a str) -> Self {
        PredictRecord(prediction, word)
    }

    pub fn prediction(&self) -> f32 {
        self.0
    }

    pub fn word(&self) -> &'a str {
        self.1
    }
}

impl PartialEq for PredictRecord<'_> {
    fn eq(&self, other: &PredictRecord<'_>) -> bool {
        (self.0 - other.0).abs() < EPS && self.1 == other.1
    }
}

/// Prediction result released on drop
#[derive(Debug)]
pub struct Predict {
    handle: NonNull<PredictResultHandle>,
    // Borrows word storage owned by `handle`; only handed out tied to `&self`
    data: Vec<PredictRecord<'static>>,
    err: String,
}

impl Predict {
    /// Take ownership of a handle produced by the C surface.
    ///
    /// # Safety
    /// - `raw` must be null or a live result handle not owned by anyone else
    pub unsafe fn from_raw(raw: *mut PredictResultHandle) -> Option<Predict> {
        NonNull::new(raw).map(|handle| Self::read(handle))
    }

    /// Wrap a result built on the Rust side.
    pub fn from_result(result: PredictResultHandle) -> Predict {
        let handle = NonNull::from(Box::leak(Box::new(result)));
        unsafe { Self::read(handle) }
    }

    unsafe fn read(handle: NonNull<PredictResultHandle>) -> Predict {
        let err_ptr = prdct_error(handle.as_ptr());
        let err = if err_ptr.is_null() {
            String::new()
        } else {
            CStr::from_ptr(err_ptr).to_string_lossy().into_owned()
        };

        let records = prdct_records(handle.as_ptr());
        let len = prdct_len(handle.as_ptr());
        let data = if !err.is_empty() || records.is_null() || len <= 0 {
            Vec::new()
        } else {
            std::slice::from_raw_parts(records, len as usize)
                .iter()
                .map(|record| {
                    let word: &'static str = if record.word.is_null() {
                        ""
                    } else {
                        CStr::from_ptr(record.word).to_str().unwrap_or_default()
                    };
                    PredictRecord(record.predict, word)
                })
                .collect()
        };

        Predict { handle, data, err }
    }

    pub fn as_slice(&self) -> &[PredictRecord<'_>] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `Err` with the engine's message when the prediction failed.
    pub fn err(&self) -> Result<(), String> {
        if self.err.is_empty() {
            Ok(())
        } else {
            Err(self.err.clone())
        }
    }
}

impl Drop for Predict {
    fn drop(&mut self) {
        self.data.clear();
        unsafe { prdct_release(self.handle.as_ptr()) };
    }
}
