//! Zero-copy sub-range of another vector.

use crate::core::cache::LengthCache;
use crate::core::traits::{Vector, VectorFlags};
use crate::error::VectorError;
use crate::vector::DenseVector;

/// `[offset, offset + length)` of an owning vector.
///
/// The view exclusively borrows its owner for `'a`, so it cannot outlive it
/// and the owner cannot be touched while the view is alive. Reads and writes
/// are forwarded with the index shifted by `offset`; writes also invalidate
/// the owner's length cache. The view keeps its own cache for the squared
/// length of the sub-range.
pub struct VectorView<'a, V: Vector + ?Sized> {
    owner: &'a mut V,
    offset: usize,
    length: usize,
    length_squared: LengthCache,
}

impl<'a, V: Vector + ?Sized> VectorView<'a, V> {
    /// Fails with [`VectorError::Index`] when the range does not fit in the owner.
    pub fn new(owner: &'a mut V, offset: usize, length: usize) -> Result<Self, VectorError> {
        let size = owner.size();
        match offset.checked_add(length) {
            Some(end) if end <= size => {}
            _ => {
                return Err(VectorError::Index { index: offset.saturating_add(length), size });
            }
        }
        tracing::trace!(offset, length, owner_size = size, "creating vector view");
        Ok(Self { owner, offset, length, length_squared: LengthCache::new() })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read-only access to the owning vector.
    pub fn owner(&self) -> &V {
        &*self.owner
    }
}

impl<V: Vector + ?Sized> Vector for VectorView<'_, V> {
    fn size(&self) -> usize {
        self.length
    }

    fn get_quick(&self, index: usize) -> f64 {
        self.owner.get_quick(index + self.offset)
    }

    fn set_quick(&mut self, index: usize, value: f64) {
        self.length_squared.invalidate();
        self.owner.set_quick(index + self.offset, value);
    }

    fn capabilities(&self) -> VectorFlags {
        self.owner.capabilities()
    }

    fn num_nondefault_elements(&self) -> usize {
        self.length
    }

    fn length_cache(&self) -> &LengthCache {
        &self.length_squared
    }

    /// A dense all-zero vector of the view's length.
    fn like(&self) -> Box<dyn Vector> {
        Box::new(DenseVector::new(self.length))
    }

    /// An independent dense copy of the viewed range; no storage is shared.
    fn clone_vector(&self) -> Box<dyn Vector> {
        Box::new(DenseVector::from_vector(self))
    }

    fn as_slice(&self) -> Option<&[f64]> {
        self.owner
            .as_slice()
            .map(|values| &values[self.offset..self.offset + self.length])
    }

    fn next_non_zero(&self, from: usize) -> Option<usize> {
        let end = self.offset + self.length;
        self.owner
            .next_non_zero(from + self.offset)
            .filter(|&i| i < end)
            .map(|i| i - self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_views_are_rejected() {
        let mut v = DenseVector::new(4);
        assert_eq!(v.view_part(2, 3).err(), Some(VectorError::Index { index: 5, size: 4 }));
        assert_eq!(
            v.view_part(usize::MAX, 2).err(),
            Some(VectorError::Index { index: usize::MAX, size: 4 })
        );
        assert!(v.view_part(4, 0).is_ok());
        assert!(v.view_part(0, 4).is_ok());
    }

    #[test]
    fn view_translates_indices() {
        let mut v = DenseVector::from_slice(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        {
            let mut view = v.view_part(1, 3).unwrap();
            assert_eq!(view.size(), 3);
            assert_eq!(view.get(0), Ok(1.0));
            assert_eq!(view.get(3), Err(VectorError::Index { index: 3, size: 3 }));
            view.set(2, 30.0).unwrap();
            assert_eq!(view.as_slice(), Some(&[1.0, 2.0, 30.0][..]));
        }
        assert_eq!(v.values(), &[0.0, 1.0, 2.0, 30.0, 4.0]);
    }

    #[test]
    fn view_seek_stays_inside_range() {
        let mut v = DenseVector::from_slice(&[7.0, 0.0, 0.0, 5.0, 9.0]);
        let view = v.view_part(1, 3).unwrap();
        assert_eq!(view.next_non_zero(0), Some(2));
        assert_eq!(view.next_non_zero(3), None);
        let mut short = DenseVector::from_slice(&[1.0, 0.0, 0.0, 8.0]);
        let view = short.view_part(0, 3).unwrap();
        assert_eq!(view.next_non_zero(1), None);
    }

    #[test]
    fn writes_invalidate_owner_and_view_caches() {
        let mut v = DenseVector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(v.length_squared(), 14.0);
        {
            let mut view = v.view_part(1, 2).unwrap();
            assert_eq!(view.length_squared(), 13.0);
            view.set_quick(0, 0.0);
            assert_eq!(view.length_squared(), 9.0);
        }
        assert_eq!(v.length_squared(), 10.0);
    }
}
