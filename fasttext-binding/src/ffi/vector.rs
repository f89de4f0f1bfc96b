//! Vector Handle Functions

use libc::{c_float, c_int};

/// Dense embedding owned by the host until `vec_release`
#[derive(Debug, Clone, PartialEq)]
pub struct VectorHandle {
    data: Box<[f32]>,
}

impl VectorHandle {
    /// Zero-filled vector of `len` floats
    pub fn zeroed(len: usize) -> Self {
        VectorHandle {
            data: vec![0.0f32; len].into_boxed_slice(),
        }
    }

    pub fn from_vec(data: Vec<f32>) -> Self {
        VectorHandle {
            data: data.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Move onto the heap and hand ownership to the host.
    pub fn into_raw(self) -> *mut VectorHandle {
        Box::into_raw(Box::new(self))
    }
}

/// Number of floats in the vector
///
/// # Safety
/// - `vector` must be a live handle returned by this library
#[no_mangle]
pub unsafe extern "C" fn vec_len(vector: *const VectorHandle) -> c_int {
    if vector.is_null() {
        return 0;
    }
    let vector = unsafe { &*vector };
    c_int::try_from(vector.len()).unwrap_or(c_int::MAX)
}

/// Pointer to the first float, or null for an empty vector
///
/// The pointer stays valid until `vec_release`.
///
/// # Safety
/// - `vector` must be a live handle returned by this library
#[no_mangle]
pub unsafe extern "C" fn vec_data(vector: *const VectorHandle) -> *const c_float {
    if vector.is_null() {
        return std::ptr::null();
    }
    let vector = unsafe { &*vector };
    if vector.is_empty() {
        std::ptr::null()
    } else {
        vector.as_slice().as_ptr()
    }
}

/// Free the vector buffer and its handle
///
/// # Safety
/// - `vector` must be null or a handle not released before
#[no_mangle]
pub unsafe extern "C" fn vec_release(vector: *mut VectorHandle) {
    if !vector.is_null() {
        unsafe {
            drop(Box::from_raw(vector));
        }
    }
}
