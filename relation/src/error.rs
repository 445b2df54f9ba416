//! Relation error types.

use rowmap_core::{RelationName, Value};
use thiserror::Error;

/// Result type for relation operations.
pub type RelationResult<T> = Result<T, RelationError>;

/// Errors an adapter raises while reading or writing a relation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RelationError {
    #[error("Invalid pattern /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid arguments for view {view}: {message}")]
    InvalidArguments { view: String, message: String },

    #[error("Duplicate primary key {key} in relation {relation}")]
    DuplicateKey { relation: RelationName, key: Value },

    #[error("Cannot change primary key {attr} of relation {relation}")]
    PrimaryKeyChange { relation: RelationName, attr: String },

    #[error("No integer primary keys left in relation {relation}")]
    KeySpaceExhausted { relation: RelationName },
}

impl RelationError {
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn invalid_arguments(view: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            view: view.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_key(relation: RelationName, key: Value) -> Self {
        Self::DuplicateKey { relation, key }
    }

    pub fn primary_key_change(relation: RelationName, attr: impl Into<String>) -> Self {
        Self::PrimaryKeyChange {
            relation,
            attr: attr.into(),
        }
    }

    pub fn key_space_exhausted(relation: RelationName) -> Self {
        Self::KeySpaceExhausted { relation }
    }
}
