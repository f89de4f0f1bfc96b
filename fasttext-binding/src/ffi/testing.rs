//! Test-Support Functions
//!
//! Deterministic generators that let a host exercise the marshaling layer
//! without a model file. Not part of the production contract.

use crate::ffi::predict::{PredictResultBuilder, PredictResultHandle};
use crate::ffi::vector::VectorHandle;
use crate::utils::glibc_random::{GlibcRandom, RAND_MAX};
use libc::{c_int, c_short};
use rand::{RngCore, SeedableRng};

/// Seed applied before every synthetic prediction.
pub const TEST_SEED: u32 = 42;

/// Message carried by a synthetic failed prediction.
pub const TEST_ERROR: &str = "test error";

/// Words drawn by [`synthetic_predictions`].
pub const TEST_WORDS: [&str; 6] = ["слово", "о", "полку", "Игореве", "Бояна", "сказ"];

/// Value at `index` of the synthetic test vector.
pub fn synthetic_component(index: usize) -> f32 {
    let i = index as f32;
    let denominator = f64::from((index as f64 + 0.0001) as f32);
    (1.0 + (1.0 / denominator) * (f64::from(i * i) * 1.019238)) as f32
}

/// Zero vector when `empty`, otherwise the synthetic sequence
/// `1, 2.019136, 3.0383742, ...` of length `len`.
pub fn synthetic_vector(empty: bool, len: usize) -> VectorHandle {
    if empty {
        VectorHandle::zeroed(len)
    } else {
        VectorHandle::from_vec((0..len).map(synthetic_component).collect())
    }
}

/// `len` pseudo-random predictions drawn from a generator re-seeded with
/// [`TEST_SEED`], or a failure carrying [`TEST_ERROR`].
pub fn synthetic_predictions(fail: bool, len: usize) -> PredictResultHandle {
    if fail {
        return PredictResultHandle::failure(TEST_ERROR);
    }

    let mut rng = GlibcRandom::seed_from_u64(u64::from(TEST_SEED));
    draw_predictions(&mut rng, len)
}

/// Each draw `r` yields the score `r / RAND_MAX` and the word
/// `TEST_WORDS[r % 6]`. With a [`GlibcRandom`] source the sequence is
/// identical across runs and matches the C library's `rand()`.
pub fn draw_predictions<R: RngCore>(rng: &mut R, len: usize) -> PredictResultHandle {
    let mut builder = PredictResultBuilder::with_len(len);
    for i in 0..len {
        let r = rng.next_u32() % (RAND_MAX as u32 + 1);
        let score = r as f32 / RAND_MAX as f32;
        let word = TEST_WORDS[r as usize % TEST_WORDS.len()];
        builder.set(i, score, word);
    }
    builder.finish()
}

/// Synthetic vector handle; release with `vec_release`
#[no_mangle]
pub extern "C" fn test_vec_new(empty: c_short, sz: c_int) -> *mut VectorHandle {
    synthetic_vector(empty != 0, sz.max(0) as usize).into_raw()
}

/// Synthetic prediction result; release with `prdct_release`
#[no_mangle]
pub extern "C" fn test_prdct_new(err: c_short, sz: c_int) -> *mut PredictResultHandle {
    synthetic_predictions(err != 0, sz.max(0) as usize).into_raw()
}
