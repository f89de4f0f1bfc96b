//! Owned dense vector

use crate::ffi::vector::{vec_data, vec_len, vec_release, VectorHandle};
use std::ops::Deref;
use std::ptr::NonNull;

/// Vector handle released on drop; dereferences to `[f32]`
#[derive(Debug)]
pub struct Vector {
    handle: NonNull<VectorHandle>,
}

impl Vector {
    /// Take ownership of a handle produced by the C surface.
    ///
    /// # Safety
    /// - `raw` must be null or a live vector handle not owned by anyone else
    pub unsafe fn from_raw(raw: *mut VectorHandle) -> Option<Vector> {
        NonNull::new(raw).map(|handle| Vector { handle })
    }

    pub fn as_slice(&self) -> &[f32] {
        unsafe {
            let data = vec_data(self.handle.as_ptr());
            let len = vec_len(self.handle.as_ptr());
            if data.is_null() || len <= 0 {
                &[]
            } else {
                std::slice::from_raw_parts(data, len as usize)
            }
        }
    }
}

impl Deref for Vector {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl Drop for Vector {
    fn drop(&mut self) {
        unsafe { vec_release(self.handle.as_ptr()) };
    }
}
