//! Per-instance memo slot for the squared Euclidean length.

use std::cell::Cell;

/// Lazily cached `sum(x_i^2)`.
///
/// The slot is empty while invalid. Whatever the computation returned is kept,
/// NaN included, so a vector holding NaN is not re-summed on every read.
/// Interior mutability lets `&self` readers fill the cache, which also makes
/// the owning vector `!Sync`.
#[derive(Debug, Clone)]
pub struct LengthCache {
    value: Cell<Option<f64>>,
}

impl LengthCache {
    pub fn new() -> Self {
        Self { value: Cell::new(None) }
    }

    /// The cached value, if valid.
    pub fn get(&self) -> Option<f64> {
        self.value.get()
    }

    /// Returns the cached value or computes, stores and returns it.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> f64) -> f64 {
        if let Some(v) = self.get() {
            return v;
        }
        let v = compute();
        self.value.set(Some(v));
        v
    }

    pub fn invalidate(&self) {
        self.value.set(None);
    }
}

impl Default for LengthCache {
    fn default() -> Self {
        Self::new()
    }
}
