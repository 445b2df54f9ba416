//! Changeset error types.

use rowmap_command::CommandError;
use rowmap_core::RelationName;
use thiserror::Error;

/// Result type for changeset operations.
pub type ChangesetResult<T> = Result<T, ChangesetError>;

/// Errors that can occur while configuring or committing a changeset.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChangesetError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("No command compiler configured for changeset on {relation}")]
    MissingCommandCompiler { relation: RelationName },

    #[error("Undefined method `{method}` for changeset on {relation}")]
    UnsupportedOperation { method: String, relation: RelationName },

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl ChangesetError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn missing_command_compiler(relation: RelationName) -> Self {
        Self::MissingCommandCompiler { relation }
    }

    pub fn unsupported_operation(method: impl Into<String>, relation: RelationName) -> Self {
        Self::UnsupportedOperation {
            method: method.into(),
            relation,
        }
    }
}
