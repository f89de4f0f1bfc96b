//! # Utility Functions

pub mod glibc_random;

pub use glibc_random::{GlibcRandom, RAND_MAX};

#[cfg(test)]
pub mod glibc_random_test;
