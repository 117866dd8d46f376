//! Core vector trait for mahvec.
//!
//! `Vector` is split in two layers. Concrete storage types supply the required
//! primitives (size, unchecked element access, capability flags, the length
//! cache and the two factories). Everything else is a provided method written
//! only in terms of those primitives and the traversals in [`crate::core::iter`],
//! so a new storage kind works out of the box and overrides only the hot paths
//! it can beat.

use std::fmt;

use bitflags::bitflags;

use crate::core::cache::LengthCache;
use crate::core::iter::Traverse;
use crate::error::VectorError;
use crate::functions::{BinaryFunction, FunctionFlags, Minus, Plus, Times, UnaryFunction};
use crate::vector::VectorView;

bitflags! {
    /// Storage capabilities other components use to pick fast paths.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct VectorFlags: u32 {
        /// Every index has backing storage.
        const DENSE             = 0b0000_0001;
        /// In-order access is cheap.
        const SEQUENTIAL_ACCESS = 0b0000_0010;
    }
}

/// A fixed-cardinality sequence of `f64` addressed by `[0, size)`.
pub trait Vector {
    /// Cardinality, fixed for the lifetime of the instance.
    fn size(&self) -> usize;

    /// Unchecked read. Panics or returns garbage for `index >= size()`
    /// depending on the storage; callers establish validity first.
    fn get_quick(&self, index: usize) -> f64;

    /// Unchecked write. Must invalidate the length cache.
    fn set_quick(&mut self, index: usize, value: f64);

    fn capabilities(&self) -> VectorFlags;

    /// Number of stored entries: `size()` for dense storage.
    fn num_nondefault_elements(&self) -> usize;

    /// The per-instance squared-length memo.
    fn length_cache(&self) -> &LengthCache;

    /// A new all-zero vector of the same kind and size.
    fn like(&self) -> Box<dyn Vector>;

    /// A deep copy with independent storage.
    fn clone_vector(&self) -> Box<dyn Vector>;

    /// The values as one contiguous slice, when the storage allows it.
    fn as_slice(&self) -> Option<&[f64]> {
        None
    }

    fn is_dense(&self) -> bool {
        self.capabilities().contains(VectorFlags::DENSE)
    }

    fn is_sequential_access(&self) -> bool {
        self.capabilities().contains(VectorFlags::SEQUENTIAL_ACCESS)
    }

    fn get(&self, index: usize) -> Result<f64, VectorError> {
        VectorError::check_index(index, self.size())?;
        Ok(self.get_quick(index))
    }

    fn set(&mut self, index: usize, value: f64) -> Result<(), VectorError> {
        VectorError::check_index(index, self.size())?;
        self.set_quick(index, value);
        Ok(())
    }

    /// Smallest index `>= from` whose current value is non-zero.
    ///
    /// Drives the non-zero traversal. Sparse storage should override this
    /// with a lookup in its index structure.
    fn next_non_zero(&self, from: usize) -> Option<usize> {
        (from..self.size()).find(|&i| self.get_quick(i) != 0.0)
    }

    /// Sets every element to `value`.
    fn assign(&mut self, value: f64) {
        for i in 0..self.size() {
            self.set_quick(i, value);
        }
        self.length_cache().invalidate();
    }

    /// [`assign`](Vector::assign) returning `self`, for concrete types.
    fn assign_chained(&mut self, value: f64) -> &mut Self
    where
        Self: Sized,
    {
        self.assign(value);
        self
    }

    /// `self[i] = f(self[i], other[i])` for every index.
    ///
    /// When `f` declares [`FunctionFlags::RIGHT_ZERO_IDENTITY`] only the
    /// non-zero entries of `other` are visited.
    fn assign_with(&mut self, other: &dyn Vector, f: &dyn BinaryFunction) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        if f.flags().contains(FunctionFlags::RIGHT_ZERO_IDENTITY) {
            tracing::trace!(size = self.size(), "assign_with: skipping zero operand entries");
            for (i, x) in other.iterate_non_zero() {
                let a = self.get_quick(i);
                self.set_quick(i, f.apply(a, x));
            }
        } else {
            for i in 0..self.size() {
                let a = self.get_quick(i);
                self.set_quick(i, f.apply(a, other.get_quick(i)));
            }
        }
        Ok(())
    }

    /// `self[i] = f(self[i])` for every index.
    fn assign_unary(&mut self, f: &dyn UnaryFunction) {
        for i in 0..self.size() {
            let x = self.get_quick(i);
            self.set_quick(i, f.apply(x));
        }
    }

    /// Overwrites every element from `values`.
    fn assign_values(&mut self, values: &[f64]) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), values.len())?;
        for (i, &x) in values.iter().enumerate() {
            self.set_quick(i, x);
        }
        Ok(())
    }

    /// Copies every element of `other`.
    fn assign_from(&mut self, other: &dyn Vector) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        for i in 0..self.size() {
            self.set_quick(i, other.get_quick(i));
        }
        Ok(())
    }

    /// `other[i] += self[i]`. Mutates the argument, not `self`.
    fn add_to(&self, other: &mut dyn Vector) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        for (i, x) in self.iterate_non_zero() {
            let y = other.get_quick(i);
            other.set_quick(i, x + y);
        }
        Ok(())
    }

    /// `self[i] += other[i]` over the non-zero entries of `other`.
    fn add_all(&mut self, other: &dyn Vector) -> Result<(), VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        for (i, x) in other.iterate_non_zero() {
            let a = self.get_quick(i);
            self.set_quick(i, a + x);
        }
        Ok(())
    }

    /// `sum(self[i] * other[i])`.
    fn dot(&self, other: &dyn Vector) -> Result<f64, VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        if same_storage(self, other) {
            return Ok(self.dot_self());
        }
        Ok(sparse_dot(self, other))
    }

    /// `sum(self[i]^2)`.
    fn dot_self(&self) -> f64 {
        self.iterate_non_zero().map(|(_, x)| x * x).sum()
    }

    /// `dot_self()`, memoized until the next mutation.
    fn length_squared(&self) -> f64 {
        self.length_cache().get_or_compute(|| self.dot_self())
    }

    /// `sum((self[i] - other[i])^2)`.
    fn distance_squared(&self, other: &dyn Vector) -> Result<f64, VectorError> {
        VectorError::check_cardinality(self.size(), other.size())?;
        Ok((0..self.size())
            .map(|i| {
                let d = self.get_quick(i) - other.get_quick(i);
                d * d
            })
            .sum())
    }

    /// Same size and same value at every index.
    fn equals(&self, other: &dyn Vector) -> bool {
        values_equal(self, other)
    }

    /// Zero-copy view of `[offset, offset + length)`.
    fn view_part(&mut self, offset: usize, length: usize) -> Result<VectorView<'_, Self>, VectorError>
    where
        Self: Sized,
    {
        VectorView::new(self, offset, length)
    }

    /// The p-norm. `p == 0` counts non-zero entries and `p == inf` is the
    /// largest absolute value.
    fn norm(&self, p: f64) -> Result<f64, VectorError> {
        if p.is_nan() || p < 0.0 {
            return Err(VectorError::InvalidArgument("norm power must be non-negative"));
        }
        let norm = if p == 0.0 {
            self.iterate_non_zero().count() as f64
        } else if p == 1.0 {
            self.iterate_non_zero().map(|(_, x)| x.abs()).sum()
        } else if p == 2.0 {
            self.length_squared().sqrt()
        } else if p.is_infinite() {
            self.iterate_non_zero().fold(0.0, |acc: f64, (_, x)| acc.max(x.abs()))
        } else {
            self.iterate_non_zero()
                .map(|(_, x)| x.abs().powf(p))
                .sum::<f64>()
                .powf(1.0 / p)
        };
        Ok(norm)
    }

    /// Largest element, counting implicit zeros. `-inf` when empty.
    fn max_value(&self) -> f64 {
        extreme_value(self, f64::NEG_INFINITY, f64::max)
    }

    /// Smallest element, counting implicit zeros. `+inf` when empty.
    fn min_value(&self) -> f64 {
        extreme_value(self, f64::INFINITY, f64::min)
    }

    /// First index holding the largest element.
    fn max_value_index(&self) -> Option<usize> {
        extreme_index(self, |candidate, best| candidate > best)
    }

    /// First index holding the smallest element.
    fn min_value_index(&self) -> Option<usize> {
        extreme_index(self, |candidate, best| candidate < best)
    }

    /// Sum of all elements.
    fn z_sum(&self) -> f64 {
        self.iterate_non_zero().map(|(_, x)| x).sum()
    }

    /// Folds `combiner` over `mapper(self[i])` in index order; `0.0` when empty.
    fn aggregate(&self, combiner: &dyn BinaryFunction, mapper: &dyn UnaryFunction) -> f64 {
        let mut all = self.iterate_all();
        match all.next() {
            None => 0.0,
            Some((_, first)) => all.fold(mapper.apply(first), |acc, (_, x)| combiner.apply(acc, mapper.apply(x))),
        }
    }

    fn plus(&self, other: &dyn Vector) -> Result<Box<dyn Vector>, VectorError> {
        combined(self, other, &Plus)
    }

    fn minus(&self, other: &dyn Vector) -> Result<Box<dyn Vector>, VectorError> {
        combined(self, other, &Minus)
    }

    /// Element-wise product.
    fn times_vector(&self, other: &dyn Vector) -> Result<Box<dyn Vector>, VectorError> {
        combined(self, other, &Times)
    }

    fn times(&self, scalar: f64) -> Box<dyn Vector> {
        let mut result = self.clone_vector();
        map_non_zero(result.as_mut(), |x| x * scalar);
        result
    }

    /// Divides the non-zero entries; zeros stay zero even for `scalar == 0`.
    fn divide(&self, scalar: f64) -> Box<dyn Vector> {
        let mut result = self.clone_vector();
        if scalar != 1.0 {
            map_non_zero(result.as_mut(), |x| x / scalar);
        }
        result
    }

    fn plus_scalar(&self, scalar: f64) -> Box<dyn Vector> {
        let mut result = self.clone_vector();
        result.assign_unary(&|x: f64| x + scalar);
        result
    }

    /// Unit-length copy. A zero vector normalizes to itself.
    fn normalize(&self) -> Box<dyn Vector> {
        let length = self.length_squared().sqrt();
        if length == 0.0 {
            return self.clone_vector();
        }
        self.divide(length)
    }

    /// Copy scaled to unit p-norm.
    fn normalize_p(&self, p: f64) -> Result<Box<dyn Vector>, VectorError> {
        let norm = self.norm(p)?;
        if norm == 0.0 {
            return Ok(self.clone_vector());
        }
        Ok(self.divide(norm))
    }
}

impl PartialEq for dyn Vector + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for dyn Vector + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.size()).map(|i| self.get_quick(i)))
            .finish()
    }
}

impl Clone for Box<dyn Vector> {
    fn clone(&self) -> Self {
        self.clone_vector()
    }
}

/// True when both operands expose the very same contiguous buffer.
///
/// An address match alone is not enough: a wrapper holding a vector as its
/// first field shares that vector's address without sharing its values.
pub(crate) fn same_storage<V: Vector + ?Sized>(v: &V, other: &dyn Vector) -> bool {
    match (v.as_slice(), other.as_slice()) {
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        _ => false,
    }
}

/// Dot product walking the non-zeros of whichever operand stores fewer entries.
pub(crate) fn sparse_dot<V: Vector + ?Sized>(v: &V, other: &dyn Vector) -> f64 {
    if v.num_nondefault_elements() <= other.num_nondefault_elements() {
        v.iterate_non_zero().map(|(i, x)| x * other.get_quick(i)).sum()
    } else {
        other.iterate_non_zero().map(|(i, x)| x * v.get_quick(i)).sum()
    }
}

/// Index-by-index comparison.
pub(crate) fn values_equal<V: Vector + ?Sized>(v: &V, other: &dyn Vector) -> bool {
    v.size() == other.size() && (0..v.size()).all(|i| v.get_quick(i) == other.get_quick(i))
}

fn extreme_value<V: Vector + ?Sized>(v: &V, empty: f64, pick: fn(f64, f64) -> f64) -> f64 {
    if v.size() == 0 {
        return empty;
    }
    let mut visited = 0;
    let mut result = empty;
    for (_, x) in v.iterate_non_zero() {
        visited += 1;
        result = pick(result, x);
    }
    if visited < v.size() {
        result = pick(result, 0.0);
    }
    result
}

fn extreme_index<V: Vector + ?Sized>(v: &V, better: fn(f64, f64) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, x) in v.iterate_all() {
        match best {
            Some((_, b)) if !better(x, b) => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

fn combined<V: Vector + ?Sized>(
    v: &V,
    other: &dyn Vector,
    f: &dyn BinaryFunction,
) -> Result<Box<dyn Vector>, VectorError> {
    VectorError::check_cardinality(v.size(), other.size())?;
    let mut result = v.clone_vector();
    result.assign_with(other, f)?;
    Ok(result)
}

fn map_non_zero(v: &mut dyn Vector, f: impl Fn(f64) -> f64) {
    let mut cursor = v.iterate_non_zero_mut();
    while let Ok(mut element) = cursor.next_element() {
        let x = element.get();
        element.set(f(x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::DenseVector;

    #[test]
    fn validated_accessors_reject_out_of_range() {
        let mut v = DenseVector::new(3);
        assert_eq!(v.get(3), Err(VectorError::Index { index: 3, size: 3 }));
        assert_eq!(v.set(7, 1.0), Err(VectorError::Index { index: 7, size: 3 }));
        v.set(2, 4.0).unwrap();
        assert_eq!(v.get(2), Ok(4.0));
    }

    #[test]
    fn assign_chains_on_concrete_types() {
        let mut v = DenseVector::new(3);
        v.assign_chained(2.0).set(1, 5.0).unwrap();
        assert_eq!(v.values(), &[2.0, 5.0, 2.0]);
        assert_eq!(v.assign_chained(1.0).length_squared(), 3.0);
    }

    #[test]
    fn norms_of_mixed_vector() {
        let v = DenseVector::from_slice(&[3.0, 0.0, -4.0]);
        assert_eq!(v.norm(0.0).unwrap(), 2.0);
        assert_eq!(v.norm(1.0).unwrap(), 7.0);
        assert_eq!(v.norm(2.0).unwrap(), 5.0);
        assert_eq!(v.norm(f64::INFINITY).unwrap(), 4.0);
        assert!((v.norm(3.0).unwrap() - 91f64.powf(1.0 / 3.0)).abs() < 1e-12);
        assert!(matches!(v.norm(-1.0), Err(VectorError::InvalidArgument(_))));
    }

    #[test]
    fn extremes_count_implicit_zeros() {
        let v = DenseVector::from_slice(&[0.0, 5.0, 0.0, -2.0]);
        assert_eq!(v.max_value(), 5.0);
        assert_eq!(v.min_value(), -2.0);
        assert_eq!(v.max_value_index(), Some(1));
        assert_eq!(v.min_value_index(), Some(3));

        let positive = DenseVector::from_slice(&[0.0, 1.0]);
        assert_eq!(positive.min_value(), 0.0);

        let empty = DenseVector::new(0);
        assert_eq!(empty.max_value(), f64::NEG_INFINITY);
        assert_eq!(empty.min_value(), f64::INFINITY);
        assert_eq!(empty.max_value_index(), None);
    }

    #[test]
    fn aggregate_and_z_sum() {
        let v = DenseVector::from_slice(&[1.0, -2.0, 3.0]);
        assert_eq!(v.z_sum(), 2.0);
        assert_eq!(v.aggregate(&Plus, &crate::functions::Abs), 6.0);
        assert_eq!(v.aggregate(&crate::functions::Max, &crate::functions::Identity), 3.0);
        assert_eq!(DenseVector::new(0).aggregate(&Plus, &crate::functions::Square), 0.0);
    }

    #[test]
    fn divide_keeps_zeros_and_normalize_is_unit() {
        let v = DenseVector::from_slice(&[0.0, 3.0, 4.0]);
        let d = v.divide(0.0);
        assert_eq!(d.get_quick(0), 0.0);
        assert!(d.get_quick(1).is_infinite());

        let n = v.normalize();
        assert!((n.length_squared() - 1.0).abs() < 1e-12);
        assert_eq!(*DenseVector::new(2).normalize(), *DenseVector::new(2).clone_vector());

        let n1 = v.normalize_p(1.0).unwrap();
        assert!((n1.norm(1.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn arithmetic_results_are_new_vectors() {
        let a = DenseVector::from_slice(&[1.0, 2.0]);
        let b = DenseVector::from_slice(&[3.0, -1.0]);
        assert_eq!(*a.plus(&b).unwrap(), *DenseVector::from_slice(&[4.0, 1.0]).clone_vector());
        assert_eq!(*a.minus(&b).unwrap(), *DenseVector::from_slice(&[-2.0, 3.0]).clone_vector());
        assert_eq!(*a.times_vector(&b).unwrap(), *DenseVector::from_slice(&[3.0, -2.0]).clone_vector());
        assert_eq!(*a.times(2.0), *DenseVector::from_slice(&[2.0, 4.0]).clone_vector());
        assert_eq!(*a.plus_scalar(1.0), *DenseVector::from_slice(&[2.0, 3.0]).clone_vector());
        assert_eq!(a.distance_squared(&b).unwrap(), 4.0 + 9.0);
        assert_eq!(a, DenseVector::from_slice(&[1.0, 2.0]));
    }

    #[test]
    fn binary_ops_check_cardinality() {
        let a = DenseVector::new(2);
        let b = DenseVector::new(3);
        let expected = VectorError::Cardinality { expected: 2, actual: 3 };
        assert_eq!(a.plus(&b).unwrap_err(), expected);
        assert_eq!(a.distance_squared(&b).unwrap_err(), expected);
        let mut c = DenseVector::new(2);
        assert_eq!(c.assign_values(&[1.0; 3]).unwrap_err(), expected);
        assert_eq!(c.assign_from(&b).unwrap_err(), expected);
    }
}
