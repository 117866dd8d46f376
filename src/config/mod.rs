//! Configuration types for mahvec kernels.

pub mod options;
pub use options::KernelOptions;
