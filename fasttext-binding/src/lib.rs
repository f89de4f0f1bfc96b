//! # fasttext-binding
//!
//! C ABI surface over a fastText-style embedding and classification engine.
//! Hosts create opaque handles, load a validated model (and optionally a
//! vectors file), query the vocabulary, request word or sentence vectors, run
//! prediction, and release every handle they received.
//!
//! The engine itself is supplied through [`engine::Engine`]; this crate owns
//! the marshaling, lifetimes and error translation around it.

// Core layer: errors, configuration, file validation
pub mod core;

// Engine seam and factory registry
pub mod engine;

// extern "C" surface
pub mod ffi;

// Safe Rust wrappers over the C surface
pub mod client;

pub mod utils;

// Shared test fixtures (only compiled in test builds)
#[cfg(test)]
pub mod test_fixtures;

pub use crate::client::{Dictionary, FastText, Predict, PredictRecord, Vector, WordVectorModel};
pub use crate::core::{BindingConfig, BindingError, BindingResult, EngineError, ResultCode};
pub use crate::engine::{register_engine_factory, Engine, EngineFactory, Prediction, Vocabulary};
