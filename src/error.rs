use thiserror::Error;

// Unified error type for mahvec

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorError {
    #[error("cardinality mismatch: expected {expected}, got {actual}")]
    Cardinality { expected: usize, actual: usize },
    #[error("index {index} out of bounds for vector of size {size}")]
    Index { index: usize, size: usize },
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    #[error("traversal exhausted: no remaining elements")]
    Exhausted,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("element {index} has no f64 representation")]
    Conversion { index: usize },
}

impl VectorError {
    /// Checks that `actual` matches the cardinality `expected`.
    pub(crate) fn check_cardinality(expected: usize, actual: usize) -> Result<(), VectorError> {
        if expected != actual {
            tracing::debug!(expected, actual, "cardinality mismatch");
            return Err(VectorError::Cardinality { expected, actual });
        }
        Ok(())
    }

    /// Checks that `index` lies in `[0, size)`.
    pub(crate) fn check_index(index: usize, size: usize) -> Result<(), VectorError> {
        if index >= size {
            return Err(VectorError::Index { index, size });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_error_reports_both_sizes() {
        let err = VectorError::check_cardinality(3, 5).unwrap_err();
        assert_eq!(err, VectorError::Cardinality { expected: 3, actual: 5 });
        assert_eq!(err.to_string(), "cardinality mismatch: expected 3, got 5");
    }

    #[test]
    fn index_check_is_half_open() {
        assert!(VectorError::check_index(0, 1).is_ok());
        assert_eq!(
            VectorError::check_index(1, 1),
            Err(VectorError::Index { index: 1, size: 1 })
        );
    }
}
