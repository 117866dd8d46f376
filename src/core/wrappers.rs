//! Interop between dense vectors and `faer` columns and column matrices.
//!
//! The matrix layer of the toolkit is built on `faer`; these conversions let
//! a `DenseVector` enter it as a `Col` or an `n x 1` matrix and come back out.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use faer::{Col, ColRef, Mat};

use crate::core::traits::Vector;
use crate::error::VectorError;
use crate::vector::DenseVector;

impl DenseVector {
    /// Copies the values into a faer column.
    pub fn to_col(&self) -> Col<f64> {
        let values = self.values();
        Col::from_fn(values.len(), |i| values[i])
    }

    /// Copies the values into an `n x 1` faer matrix.
    pub fn to_column(&self) -> Mat<f64> {
        let values = self.values();
        Mat::from_fn(values.len(), 1, |i, _| values[i])
    }
}

impl From<ColRef<'_, f64>> for DenseVector {
    fn from(col: ColRef<'_, f64>) -> Self {
        col.iter().copied().collect()
    }
}

impl From<&Col<f64>> for DenseVector {
    fn from(col: &Col<f64>) -> Self {
        col.iter().copied().collect()
    }
}

/// Copies a single-column faer matrix. Fails with a cardinality error
/// reporting the column count when the matrix is not a column.
impl TryFrom<&Mat<f64>> for DenseVector {
    type Error = VectorError;

    fn try_from(mat: &Mat<f64>) -> Result<Self, VectorError> {
        VectorError::check_cardinality(1, mat.ncols())?;
        Ok((0..mat.nrows()).map(|i| mat[(i, 0)]).collect())
    }
}

/// Dot product of a dense vector with column `j` of a faer matrix.
pub fn dot_column(v: &DenseVector, mat: &Mat<f64>, j: usize) -> Result<f64, VectorError> {
    VectorError::check_cardinality(v.size(), mat.nrows())?;
    VectorError::check_index(j, mat.ncols())?;
    Ok(v
        .values()
        .iter()
        .enumerate()
        .fold(0.0, |acc, (i, x)| acc + x * mat[(i, j)]))
}
