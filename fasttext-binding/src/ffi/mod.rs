//! # FFI (Foreign Function Interface) Module

// FFI modules
pub mod dictionary; //  dictionary handle functions
pub mod init; //  initialization functions
pub mod model; //  model handle, loading and prediction
pub mod predict; //  prediction result aggregation
pub mod string; //  bounded string transfer
pub mod testing; //  deterministic test generators
pub mod types; //  C structure definitions
pub mod vector; //  vector handle functions

// Re-export types and functions
pub use dictionary::*;
pub use init::*;
pub use model::*;
pub use predict::*;
pub use string::*;
pub use testing::*;
pub use types::*;
pub use vector::*;
