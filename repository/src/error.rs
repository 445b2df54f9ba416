//! Repository error types.

use rowmap_changeset::ChangesetError;
use rowmap_command::CommandError;
use rowmap_core::{RelationName, Value};
use rowmap_relation::RelationError;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// No relation registered under this name.
    #[error("unknown relation: {name}")]
    UnknownRelation { name: String },

    /// Two relations registered under one name.
    #[error("duplicate relation: {name}")]
    DuplicateRelation { name: RelationName },

    /// `by_pk` found nothing.
    #[error("no {relation} record with primary key {key}")]
    RecordNotFound { relation: RelationName, key: Value },

    /// Relation error.
    #[error("relation error: {0}")]
    Relation(#[from] RelationError),

    /// Command error.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Changeset error.
    #[error("changeset error: {0}")]
    Changeset(#[from] ChangesetError),
}

impl RepositoryError {
    pub fn unknown_relation(name: impl Into<String>) -> Self {
        Self::UnknownRelation { name: name.into() }
    }

    pub fn duplicate_relation(name: RelationName) -> Self {
        Self::DuplicateRelation { name }
    }

    pub fn record_not_found(relation: RelationName, key: Value) -> Self {
        Self::RecordNotFound { relation, key }
    }
}
