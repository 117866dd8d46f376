//! Numeric helpers shared by the vector implementations.

pub mod kernels;
