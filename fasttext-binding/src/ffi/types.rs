//! FFI Type Definitions
//!
//! Only the structures the host reads or writes field by field live here.
//! Handles are opaque to the host and are defined next to their functions.

use libc::{c_char, c_float, c_uint};

/// Caller-owned output slot for a single string
///
/// IMPORTANT: Field order must match the C typedef exactly!
/// C expects: char* str, unsigned int len, unsigned int cap
#[repr(C)]
#[derive(Debug)]
pub struct WrapperString {
    /// Start of a buffer of at least `cap` bytes, owned by the caller
    pub str: *mut c_char,
    /// Length of the source string, written by the binding
    pub len: c_uint,
    /// Capacity of `str` in bytes, set by the caller
    pub cap: c_uint,
}

/// One ranked prediction
///
/// `word` points into storage owned by the enclosing result handle and stays
/// valid until `prdct_release`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PredictRecord {
    pub predict: c_float,
    pub word: *const c_char,
}
