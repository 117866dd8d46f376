//! Dense vector: one `f64` per index in a contiguous buffer.
//!
//! Besides the primitives, `DenseVector` overrides the hot paths of the
//! `Vector` trait (dot products, bulk assignment, equality) with slice walks
//! whenever the other operand also exposes contiguous storage.

use std::fmt;
use std::ops::Index;

use num_traits::ToPrimitive;

use crate::config::KernelOptions;
use crate::core::cache::LengthCache;
use crate::core::iter::Traverse;
use crate::core::traits::{self, Vector, VectorFlags};
use crate::error::VectorError;
use crate::functions::{BinaryFunction, FunctionFlags};
use crate::utils::kernels;

#[derive(Clone)]
pub struct DenseVector {
    values: Vec<f64>,
    length_squared: LengthCache,
    options: KernelOptions,
}

impl DenseVector {
    /// All-zero vector of the given cardinality.
    pub fn new(cardinality: usize) -> Self {
        Self::from_vec(vec![0.0; cardinality])
    }

    /// Copies `values`.
    pub fn from_slice(values: &[f64]) -> Self {
        Self::from_vec(values.to_vec())
    }

    /// Takes ownership of `values` without copying.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values,
            length_squared: LengthCache::new(),
            options: KernelOptions::default(),
        }
    }

    /// Densifies any vector through its non-zero traversal.
    pub fn from_vector(vector: &dyn Vector) -> Self {
        tracing::trace!(size = vector.size(), stored = vector.num_nondefault_elements(), "densifying vector");
        let mut values = vec![0.0; vector.size()];
        for (i, x) in vector.iterate_non_zero() {
            values[i] = x;
        }
        Self::from_vec(values)
    }

    /// Converts any primitive numeric buffer.
    pub fn from_numeric<N: ToPrimitive>(values: &[N]) -> Result<Self, VectorError> {
        let values = values
            .iter()
            .enumerate()
            .map(|(index, x)| x.to_f64().ok_or(VectorError::Conversion { index }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_vec(values))
    }

    pub fn with_options(mut self, options: KernelOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_options(&mut self, options: KernelOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &KernelOptions {
        &self.options
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access to the buffer. Invalidates the cached length up front,
    /// since writes through the slice cannot be observed.
    pub fn values_mut(&mut self) -> &mut [f64] {
        self.length_squared.invalidate();
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl Vector for DenseVector {
    fn size(&self) -> usize {
        self.values.len()
    }

    fn get_quick(&self, index: usize) -> f64 {
        self.values[index]
    }

    fn set_quick(&mut self, index: usize, value: f64) {
        self.length_squared.invalidate();
        self.values[index] = value;
    }

    fn capabilities(&self) -> VectorFlags {
        VectorFlags::DENSE | VectorFlags::SEQUENTIAL_ACCESS
    }

    fn num_nondefault_elements(&self) -> usize {
        self.values.len()
    }

    fn length_cache(&self) -> &LengthCache {
        &self.length_squared
    }

    fn like(&self) -> Box<dyn Vector> {
        Box::new(DenseVector::new(self.size()).with_options(self.options))
    }

    fn clone_vector(&self) -> Box<dyn Vector> {
        Box::new(self.clone())
    }

    fn as_slice(&self) -> Option<&[f64]> {
        Some(&self.values)
    }

    fn next_non_zero(&self, from: usize) -> Option<usize> {
        self.values
            .get(from..)?
            .iter()
            .position(|&x| x != 0.0)
            .map(|offset| from + offset)
    }

    fn assign(&mut self, value: f64) {
        self.length_squared.invalidate();
        self.values.fill(value);
    }

    fn assign_with(&mut self, other: &dyn Vector, f: &dyn BinaryFunction) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        if f.flags().contains(FunctionFlags::RIGHT_ZERO_IDENTITY) {
            tracing::trace!(size = self.size(), "assign_with: skipping zero operand entries");
            for (i, x) in other.iterate_non_zero() {
                self.values[i] = f.apply(self.values[i], x);
            }
        } else if let Some(rhs) = other.as_slice() {
            for (a, &b) in self.values.iter_mut().zip(rhs) {
                *a = f.apply(*a, b);
            }
        } else {
            for (i, a) in self.values.iter_mut().enumerate() {
                *a = f.apply(*a, other.get_quick(i));
            }
        }
        self.length_squared.invalidate();
        Ok(())
    }

    fn assign_values(&mut self, values: &[f64]) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), values.len())?;
        self.length_squared.invalidate();
        self.values.copy_from_slice(values);
        Ok(())
    }

    fn add_to(&self, other: &mut dyn Vector) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        for (i, &x) in self.values.iter().enumerate() {
            let y = other.get_quick(i);
            other.set_quick(i, x + y);
        }
        Ok(())
    }

    fn add_all(&mut self, other: &dyn Vector) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        for (i, x) in other.iterate_non_zero() {
            self.values[i] += x;
        }
        self.length_squared.invalidate();
        Ok(())
    }

    fn dot(&self, other: &dyn Vector) -> Result<f64, VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        if traits::same_storage(self, other) {
            return Ok(self.dot_self());
        }
        if let Some(rhs) = other.as_slice() {
            return Ok(kernels::dot(&self.values, rhs, &self.options));
        }
        Ok(other
            .iterate_non_zero()
            .map(|(i, x)| x * self.values[i])
            .sum())
    }

    fn dot_self(&self) -> f64 {
        kernels::sum_squares(&self.values, &self.options)
    }

    fn equals(&self, other: &dyn Vector) -> bool {
        match other.as_slice() {
            Some(rhs) => self.values.as_slice() == rhs,
            None => traits::values_equal(self, other),
        }
    }
}

impl fmt::Debug for DenseVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseVector")
            .field("values", &self.values)
            .finish()
    }
}

impl PartialEq for DenseVector {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Index<usize> for DenseVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl From<Vec<f64>> for DenseVector {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

impl FromIterator<f64> for DenseVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
