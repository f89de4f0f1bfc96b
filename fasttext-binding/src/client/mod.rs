//! # Safe Client Layer
//!
//! RAII wrappers over the C surface for Rust hosts. Every wrapper owns exactly
//! one handle and releases it on drop; borrowed handles carry the lifetime of
//! the model they came from.

pub mod dictionary;
pub mod fasttext;
pub mod predict;
pub mod vector;
pub mod wordvector;

pub use dictionary::Dictionary;
pub use fasttext::FastText;
pub use predict::{Predict, PredictRecord};
pub use vector::Vector;
pub use wordvector::WordVectorModel;
