//! Borrowed vocabulary view

use crate::client::fasttext::FastText;
use crate::ffi::dictionary::{dict_find, dict_get_word, dict_release, dict_words_count, DictionaryHandle};
use crate::ffi::init::active_config;
use crate::ffi::string::c_string_lossy;
use crate::ffi::types::WrapperString;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Dictionary handle that cannot outlive its [`FastText`]
#[derive(Debug)]
pub struct Dictionary<'a> {
    handle: NonNull<DictionaryHandle>,
    _model: PhantomData<&'a FastText>,
}

impl<'a> Dictionary<'a> {
    /// # Safety
    /// - `raw` must be null or a live dictionary handle taken from a model
    ///   that outlives `'a`
    pub(crate) unsafe fn from_raw(raw: *mut DictionaryHandle) -> Option<Dictionary<'a>> {
        NonNull::new(raw).map(|handle| Dictionary {
            handle,
            _model: PhantomData,
        })
    }

    /// Id of `word`, `None` when the word is unknown.
    pub fn find(&self, word: &str) -> Option<i32> {
        let word = c_string_lossy(word);
        let id = unsafe { dict_find(self.handle.as_ptr(), word.as_ptr()) };
        if id >= 0 {
            Some(id)
        } else {
            None
        }
    }

    pub fn word_index(&self, word: &str) -> Option<i64> {
        self.find(word).map(i64::from)
    }

    /// Word stored at `id`, or `None` for an empty or non-UTF-8 word.
    ///
    /// Starts from the configured buffer capacity and retries once with the
    /// exact size when the first copy was truncated.
    pub fn get_word(&self, id: i32) -> Option<String> {
        let mut capacity = active_config().word_buffer_capacity.max(1);

        loop {
            let mut buf = vec![0u8; capacity];
            let mut out = WrapperString::from_buffer(&mut buf);
            unsafe { dict_get_word(self.handle.as_ptr(), id, &mut out) };

            if out.is_truncated() {
                log::debug!(
                    "word {} needs {} bytes, buffer had {}; retrying",
                    id,
                    out.len(),
                    capacity
                );
                capacity = out.len();
                continue;
            }

            buf.truncate(out.written());
            return String::from_utf8(buf).ok().filter(|word| !word.is_empty());
        }
    }

    pub fn words_count(&self) -> i32 {
        unsafe { dict_words_count(self.handle.as_ptr()) }
    }
}

impl Drop for Dictionary<'_> {
    fn drop(&mut self) {
        unsafe { dict_release(self.handle.as_ptr()) };
    }
}
