//! Tuning options for the numeric kernels.
//!
//! This module provides the `KernelOptions` struct, which every dense vector
//! carries so its contiguous kernels (dot product, sum of squares) know when
//! a slice is long enough to be worth splitting across the rayon pool.

/// Kernel tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelOptions {
    /// Minimum slice length at which reductions run in parallel.
    /// Has no effect without the `rayon` feature.
    pub parallel_min_len: usize,
}

impl KernelOptions {
    pub const DEFAULT_PARALLEL_MIN_LEN: usize = 1 << 16;

    /// Options that never take the parallel path.
    pub fn sequential() -> Self {
        Self { parallel_min_len: usize::MAX }
    }

    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    pub(crate) fn is_parallel(&self, len: usize) -> bool {
        cfg!(feature = "rayon") && len >= self.parallel_min_len
    }
}

impl Default for KernelOptions {
    fn default() -> Self {
        Self { parallel_min_len: Self::DEFAULT_PARALLEL_MIN_LEN }
    }
}
