//! Command error types.

use rowmap_core::{CommandType, RelationName, ShapeError};
use rowmap_relation::RelationError;
use thiserror::Error;

/// Result type for command operations.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur while compiling or calling a command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("Undefined method `{method}` for command {command}")]
    UnsupportedOperation { method: String, command: CommandType },

    #[error("Unknown command {name} for relation {relation}")]
    UnknownCommand { relation: RelationName, name: CommandType },

    #[error("Command {name} already defined for relation {relation}")]
    DuplicateCommand { relation: RelationName, name: CommandType },

    #[error("Command {command} is built for adapter {expected}, relation uses {actual}")]
    AdapterMismatch {
        command: CommandType,
        expected: String,
        actual: String,
    },

    #[error("Command {command} requires input")]
    MissingInput { command: CommandType },

    #[error("Invalid input for command {command}: {message}")]
    InvalidInput { command: CommandType, message: String },

    #[error(transparent)]
    Relation(#[from] RelationError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl CommandError {
    pub fn unsupported_operation(method: impl Into<String>, command: CommandType) -> Self {
        Self::UnsupportedOperation {
            method: method.into(),
            command,
        }
    }

    pub fn unknown_command(relation: RelationName, name: CommandType) -> Self {
        Self::UnknownCommand { relation, name }
    }

    pub fn duplicate_command(relation: RelationName, name: CommandType) -> Self {
        Self::DuplicateCommand { relation, name }
    }

    pub fn adapter_mismatch(
        command: CommandType,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::AdapterMismatch {
            command,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_input(command: CommandType) -> Self {
        Self::MissingInput { command }
    }

    pub fn invalid_input(command: CommandType, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            command,
            message: message.into(),
        }
    }
}
