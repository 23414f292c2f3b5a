//! Error taxonomy for set operations.
//!
//! Dimension errors are caller bugs and always surface. Membership outcomes are
//! not errors; see `zonotope::Membership`.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SetError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetError {
    #[error("dimension mismatch in {op}: expected {expected}, found {found}")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("vertex enumeration over {generators} generators exceeds the limit of {limit}")]
    TooManyGenerators { generators: usize, limit: usize },

    #[error("invalid reduction order {order}: need a finite order >= 1")]
    InvalidOrder { order: f64 },

    #[error("generator has length {found}, expected {expected}")]
    Ragged { expected: usize, found: usize },
}

impl SetError {
    pub(crate) fn mismatch(op: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            op,
            expected,
            found,
        }
    }
}

/// Fail with `DimensionMismatch` unless `found == expected`.
#[inline]
pub(crate) fn check_dim(op: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SetError::mismatch(op, expected, found))
    }
}
