//! mahvec: polymorphic numeric vectors for machine-learning toolkits
//!
//! This crate provides the vector contract shared by feature encoders, linear algebra
//! and model scoring: a `Vector` trait with dense-aware default algorithms, a contiguous
//! `DenseVector`, zero-copy views, and all-element / non-zero traversal cursors.

pub mod config;
pub mod core;
pub mod error;
pub mod functions;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::functions::{BinaryFunction, FunctionFlags, UnaryFunction};
pub use crate::vector::*;
