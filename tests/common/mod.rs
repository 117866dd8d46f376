//! Test doubles shared by the integration tests.
//!
//! `SparseDouble` stands in for the sparse vector implementations that live
//! outside this crate; `CountingVector` counts `dot_self` recomputations.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;

use mahvec::{DenseVector, LengthCache, Vector, VectorFlags};
use rand::Rng;

/// Map-backed sparse vector relying on the trait's default algorithms.
#[derive(Clone, Debug)]
pub struct SparseDouble {
    size: usize,
    entries: BTreeMap<usize, f64>,
    cache: LengthCache,
    /// Number of `set_quick` calls since construction.
    pub writes: usize,
}

impl SparseDouble {
    pub fn new(size: usize) -> Self {
        Self { size, entries: BTreeMap::new(), cache: LengthCache::new(), writes: 0 }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        let mut v = Self::new(values.len());
        for (i, &x) in values.iter().enumerate() {
            if x != 0.0 {
                v.entries.insert(i, x);
            }
        }
        v
    }
}

impl Vector for SparseDouble {
    fn size(&self) -> usize {
        self.size
    }

    fn get_quick(&self, index: usize) -> f64 {
        self.entries.get(&index).copied().unwrap_or(0.0)
    }

    fn set_quick(&mut self, index: usize, value: f64) {
        self.cache.invalidate();
        self.writes += 1;
        if value == 0.0 {
            self.entries.remove(&index);
        } else {
            self.entries.insert(index, value);
        }
    }

    fn capabilities(&self) -> VectorFlags {
        VectorFlags::empty()
    }

    fn num_nondefault_elements(&self) -> usize {
        self.entries.len()
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn like(&self) -> Box<dyn Vector> {
        Box::new(SparseDouble::new(self.size))
    }

    fn clone_vector(&self) -> Box<dyn Vector> {
        Box::new(self.clone())
    }

    fn next_non_zero(&self, from: usize) -> Option<usize> {
        self.entries
            .range(from..)
            .find(|&(_, &x)| x != 0.0)
            .map(|(&i, _)| i)
    }
}

/// Dense vector that counts how often its squared length is recomputed.
pub struct CountingVector {
    inner: DenseVector,
    cache: LengthCache,
    pub dot_self_calls: Cell<usize>,
}

impl CountingVector {
    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            inner: DenseVector::from_slice(values),
            cache: LengthCache::new(),
            dot_self_calls: Cell::new(0),
        }
    }

    /// Writes the storage without going through `set_quick`, so the cache
    /// of this vector is left untouched.
    pub fn poke(&mut self, index: usize, value: f64) {
        self.inner.values_mut()[index] = value;
    }
}

impl Vector for CountingVector {
    fn size(&self) -> usize {
        self.inner.size()
    }

    fn get_quick(&self, index: usize) -> f64 {
        self.inner.get_quick(index)
    }

    fn set_quick(&mut self, index: usize, value: f64) {
        self.cache.invalidate();
        self.inner.set_quick(index, value);
    }

    fn capabilities(&self) -> VectorFlags {
        self.inner.capabilities()
    }

    fn num_nondefault_elements(&self) -> usize {
        self.inner.num_nondefault_elements()
    }

    fn length_cache(&self) -> &LengthCache {
        &self.cache
    }

    fn like(&self) -> Box<dyn Vector> {
        self.inner.like()
    }

    fn clone_vector(&self) -> Box<dyn Vector> {
        self.inner.clone_vector()
    }

    fn dot_self(&self) -> f64 {
        self.dot_self_calls.set(self.dot_self_calls.get() + 1);
        self.inner.dot_self()
    }
}

/// Random values in `[-1, 1)` with roughly `zero_ratio` of them zeroed.
pub fn random_values(n: usize, zero_ratio: f64) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| {
            if rng.r#gen::<f64>() < zero_ratio {
                0.0
            } else {
                rng.gen_range(-1.0..1.0)
            }
        })
        .collect()
}
