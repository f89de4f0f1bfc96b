//! Bounded String Transfer
//!
//! Strings leave the binding in one of two ways: copied into a caller-owned
//! [`WrapperString`] buffer, or as a NUL-terminated pointer into storage owned
//! by a handle. This module covers both conversions.

use crate::ffi::types::WrapperString;
use libc::{c_char, c_uint};
use std::borrow::Cow;
use std::ffi::{CStr, CString};

/// Copy `src` into `dst` with `strncpy` semantics and return the length of
/// `src`.
///
/// At most `dst.len()` bytes are written. When `src` is shorter the rest of
/// `dst` is zero-filled, so the result is NUL-terminated; when it is longer
/// the copy is truncated and carries no terminator. The returned source
/// length lets the caller detect truncation (`returned > dst.len()`).
pub fn copy_bounded(src: &[u8], dst: &mut [u8]) -> usize {
    let copied = src.len().min(dst.len());
    dst[..copied].copy_from_slice(&src[..copied]);
    dst[copied..].fill(0);
    src.len()
}

impl WrapperString {
    /// Describe `buf` as an output slot. `buf` must outlive every use of the
    /// returned value.
    pub fn from_buffer(buf: &mut [u8]) -> Self {
        WrapperString {
            str: buf.as_mut_ptr() as *mut c_char,
            len: 0,
            cap: c_uint::try_from(buf.len()).unwrap_or(c_uint::MAX),
        }
    }

    /// Source length reported by the last write.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.cap as usize
    }

    /// Bytes actually present in the buffer after the last write.
    pub fn written(&self) -> usize {
        self.len().min(self.capacity())
    }

    /// Whether the last write did not fit.
    pub fn is_truncated(&self) -> bool {
        self.len() > self.capacity()
    }

    /// Copy `value` into the caller's buffer and record its length.
    ///
    /// # Safety
    /// - `self.str` must be null or point to at least `self.cap` writable bytes
    pub unsafe fn write(&mut self, value: &str) {
        let dst: &mut [u8] = if self.str.is_null() || self.cap == 0 {
            &mut []
        } else {
            std::slice::from_raw_parts_mut(self.str as *mut u8, self.cap as usize)
        };
        let len = copy_bounded(value.as_bytes(), dst);
        self.len = c_uint::try_from(len).unwrap_or(c_uint::MAX);
    }
}

/// Build an owned C string from `value`, cutting at the first interior NUL as
/// a C reader would.
pub fn c_string_lossy(value: &str) -> CString {
    let bytes = value.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    CString::new(&bytes[..end]).unwrap_or_default()
}

/// Borrow a C string argument as UTF-8, replacing invalid sequences.
/// A null pointer reads as the empty string.
///
/// # Safety
/// - `ptr` must be null or a valid NUL-terminated string that outlives `'a`
pub unsafe fn str_from_c<'a>(ptr: *const c_char) -> Cow<'a, str> {
    if ptr.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(ptr).to_string_lossy()
    }
}
