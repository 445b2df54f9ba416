//! Common error types for rowmap.

use crate::ResultShape;
use thiserror::Error;

/// Errors raised when a payload does not have the expected cardinality.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A write expected to touch one record touched some other number.
    #[error("Tuple count mismatch: expected {expected}, got {actual} record(s)")]
    TupleCountMismatch { expected: ResultShape, actual: usize },
}

impl ShapeError {
    pub fn tuple_count_mismatch(expected: ResultShape, actual: usize) -> Self {
        Self::TupleCountMismatch { expected, actual }
    }
}

/// Result type for shape checks.
pub type ShapeResult<T> = Result<T, ShapeError>;
