//! Contiguous slice kernels shared by the dense fast paths.
//!
//! Both reductions follow the same pattern: a plain sequential fold for short
//! slices and, when the `rayon` feature is enabled and the slice is at least
//! `KernelOptions::parallel_min_len` long, a parallel map-reduce.

use crate::config::KernelOptions;

/// Computes `sum(a[i] * b[i])`. Slices must have equal length.
pub fn dot(a: &[f64], b: &[f64], opts: &KernelOptions) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    #[cfg(feature = "rayon")]
    {
        if opts.is_parallel(a.len()) {
            use rayon::prelude::*;
            tracing::trace!(len = a.len(), "parallel dot");
            return a
                .par_iter()
                .zip(b.par_iter())
                .map(|(x, y)| x * y)
                .reduce(|| 0.0, |acc, v| acc + v);
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = opts;
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y)
}

/// Computes `sum(a[i]^2)`.
pub fn sum_squares(a: &[f64], opts: &KernelOptions) -> f64 {
    #[cfg(feature = "rayon")]
    {
        if opts.is_parallel(a.len()) {
            use rayon::prelude::*;
            tracing::trace!(len = a.len(), "parallel sum of squares");
            return a.par_iter().map(|x| x * x).reduce(|| 0.0, |acc, v| acc + v);
        }
    }
    #[cfg(not(feature = "rayon"))]
    let _ = opts;
    a.iter().fold(0.0, |acc, x| acc + x * x)
}
