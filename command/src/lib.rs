//! rowmap Command
//!
//! Executable write units bound to one relation and one command type.
//!
//! Responsibilities:
//! - Execute create/update/delete against a relation
//! - Forward view calls from restrictable commands to their relation
//! - Compile commands from (relation, type, options)
//! - Cache command classes per (adapter, relation, type) and run build hooks
//!
//! # Module Structure
//!
//! - `command` - `Command` and `Restrictable` traits, `CommandKind`, `CompileOptions`
//! - `class` - `CommandClass` and the build hook event
//! - `ops/` - Built-in command implementations (create, update, delete)
//! - `compiler` - The `CommandCompiler` trait
//! - `registry` - `CommandRegistry`, the stock compiler
//! - `error` - Error types for command failures

mod class;
mod command;
mod compiler;
mod error;
mod ops;
mod registry;

pub use class::{BuildEvent, BuildHook, CommandClass};
pub use command::{Command, CommandKind, CommandRef, CompileOptions, Restrictable};
pub use compiler::CommandCompiler;
pub use error::{CommandError, CommandResult};
pub use ops::{CreateCommand, DeleteCommand, UpdateCommand};
pub use registry::{CommandRegistry, CommandRegistryBuilder, DefinitionBuilder};
