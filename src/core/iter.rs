//! Traversal protocols over a vector.
//!
//! Two cursors are provided: [`AllElements`] visits every index in order and
//! [`NonZeroElements`] visits only indices holding a non-zero value at the
//! time the cursor reaches them. Both are single-pass and forward-only.
//!
//! Each cursor can be driven in two ways:
//!
//! - as a std [`Iterator`] of `(index, value)` pairs, the common read path;
//! - step by step with `has_next` / `next_element`, which hands out an
//!   [`Element`] handle that can also write back when the cursor was created
//!   from a mutable borrow.
//!
//! # Element reuse
//!
//! An `Element` is a repositionable handle into the cursor, not a snapshot.
//! It mutably borrows the cursor, so it is gone before the next step can be
//! taken; the borrow checker rejects code that keeps one across steps.
//!
//! ```
//! use mahvec::{DenseVector, Traverse, Vector};
//!
//! let mut v = DenseVector::from_slice(&[0.0, 5.0, 0.0, -2.0]);
//! let mut cursor = v.iterate_non_zero_mut();
//! while let Ok(mut element) = cursor.next_element() {
//!     let x = element.get();
//!     element.set(x * 10.0);
//! }
//! assert_eq!(v.values(), &[0.0, 50.0, 0.0, -20.0]);
//! ```

use std::iter::FusedIterator;
use std::ops::{Deref, DerefMut};

use crate::core::traits::Vector;
use crate::error::VectorError;

/// Handle to the element under a cursor.
pub struct Element<'c, B> {
    target: &'c mut B,
    index: usize,
}

impl<B> Element<'_, B>
where
    B: Deref,
    B::Target: Vector,
{
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current value in the backing vector.
    pub fn get(&self) -> f64 {
        (**self.target).get_quick(self.index)
    }
}

impl<B> Element<'_, B>
where
    B: DerefMut,
    B::Target: Vector,
{
    /// Writes through to the backing vector, invalidating its length cache.
    pub fn set(&mut self, value: f64) {
        (**self.target).set_quick(self.index, value);
    }
}

/// Cursor over every index `0..size` in order.
pub struct AllElements<B> {
    target: B,
    next: usize,
    size: usize,
}

impl<B> AllElements<B>
where
    B: Deref,
    B::Target: Vector,
{
    pub fn new(target: B) -> Self {
        let size = target.size();
        Self { target, next: 0, size }
    }

    pub fn has_next(&self) -> bool {
        self.next < self.size
    }

    /// Advances to the next index. Fails with [`VectorError::Exhausted`] once
    /// every index has been visited.
    pub fn next_element(&mut self) -> Result<Element<'_, B>, VectorError> {
        if !self.has_next() {
            return Err(VectorError::Exhausted);
        }
        let index = self.next;
        self.next += 1;
        Ok(Element { target: &mut self.target, index })
    }

    pub fn remove(&mut self) -> Result<(), VectorError> {
        Err(VectorError::Unsupported("remove during traversal"))
    }
}

impl<B> Iterator for AllElements<B>
where
    B: Deref,
    B::Target: Vector,
{
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some((index, self.target.get_quick(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.size - self.next;
        (left, Some(left))
    }
}

impl<B> ExactSizeIterator for AllElements<B>
where
    B: Deref,
    B::Target: Vector,
{
}

impl<B> FusedIterator for AllElements<B>
where
    B: Deref,
    B::Target: Vector,
{
}

/// Cursor over indices holding a non-zero value.
///
/// The cursor is always parked on the next index to visit: it seeks once at
/// construction and again inside every step, before the element is handed
/// out. A value zeroed after the cursor parked on it is still visited; one
/// zeroed further ahead is skipped.
pub struct NonZeroElements<B> {
    target: B,
    index: usize,
    size: usize,
}

impl<B> NonZeroElements<B>
where
    B: Deref,
    B::Target: Vector,
{
    pub fn new(target: B) -> Self {
        let size = target.size();
        let index = target.next_non_zero(0).unwrap_or(size);
        Self { target, index, size }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.size
    }

    /// Hands out the parked index and seeks the one after it. Fails with
    /// [`VectorError::Exhausted`] when no non-zero index remains.
    pub fn next_element(&mut self) -> Result<Element<'_, B>, VectorError> {
        let index = self.advance().ok_or(VectorError::Exhausted)?;
        Ok(Element { target: &mut self.target, index })
    }

    pub fn remove(&mut self) -> Result<(), VectorError> {
        Err(VectorError::Unsupported("remove during traversal"))
    }

    fn advance(&mut self) -> Option<usize> {
        if !self.has_next() {
            return None;
        }
        let current = self.index;
        self.index = self.target.next_non_zero(current + 1).unwrap_or(self.size);
        Some(current)
    }
}

impl<B> Iterator for NonZeroElements<B>
where
    B: Deref,
    B::Target: Vector,
{
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.advance()?;
        Some((index, self.target.get_quick(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.size - self.index.min(self.size);
        (0, Some(left))
    }
}

impl<B> FusedIterator for NonZeroElements<B>
where
    B: Deref,
    B::Target: Vector,
{
}

/// Traversal constructors, available on every `Vector` including `dyn Vector`.
pub trait Traverse: Vector {
    /// Every index, in order.
    fn iterate_all(&self) -> AllElements<&Self> {
        AllElements::new(self)
    }

    /// Only indices holding a non-zero value.
    fn iterate_non_zero(&self) -> NonZeroElements<&Self> {
        NonZeroElements::new(self)
    }

    /// Every index, with write-through elements.
    fn iterate_all_mut(&mut self) -> AllElements<&mut Self> {
        AllElements::new(self)
    }

    /// Only non-zero indices, with write-through elements.
    fn iterate_non_zero_mut(&mut self) -> NonZeroElements<&mut Self> {
        NonZeroElements::new(self)
    }
}

impl<V: Vector + ?Sized> Traverse for V {}
