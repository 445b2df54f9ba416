//! Command traits.

use crate::{CommandClass, CommandError, CommandResult};
use rowmap_core::{CommandType, Payload, ResultShape, Value};
use rowmap_relation::RelationRef;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a compiled command.
pub type CommandRef = Arc<dyn Command>;

/// Built-in implementation a command class is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Create,
    Update,
    Delete,
}

impl CommandKind {
    /// Command type the kind is registered under when used implicitly.
    pub fn command_type(self) -> CommandType {
        match self {
            CommandKind::Create => CommandType::CREATE,
            CommandKind::Update => CommandType::UPDATE,
            CommandKind::Delete => CommandType::DELETE,
        }
    }

    /// Built-in kind for a command type, if it names one.
    pub fn from_command_type(command_type: &CommandType) -> Option<Self> {
        match command_type.as_str() {
            "create" => Some(CommandKind::Create),
            "update" => Some(CommandKind::Update),
            "delete" => Some(CommandKind::Delete),
            _ => None,
        }
    }

    /// Whether commands of this kind can be narrowed through relation views.
    pub fn is_restrictable(self) -> bool {
        !matches!(self, CommandKind::Create)
    }
}

/// Options a command is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Shape the command returns.
    pub result: ResultShape,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            result: ResultShape::Many,
        }
    }
}

impl CompileOptions {
    pub fn new(result: ResultShape) -> Self {
        Self { result }
    }
}

/// An executable write bound to one relation and one command class.
///
/// Commands hold no state between calls.
pub trait Command: fmt::Debug + Send + Sync {
    /// Class the command was built from.
    fn class(&self) -> &Arc<CommandClass>;

    /// Relation the command writes to.
    fn relation(&self) -> &RelationRef;

    /// Shape `call` returns.
    fn result(&self) -> ResultShape;

    /// Execute the command.
    fn call(&self, input: Option<Payload>) -> CommandResult<Payload>;

    /// Restriction capability, present only on commands bound to a
    /// restrictable relation.
    fn as_restrictable(&self) -> Option<&dyn Restrictable> {
        None
    }

    /// Name the command is registered under.
    fn command_type(&self) -> &CommandType {
        self.class().name()
    }

    /// Whether a build hook or definition marked the command's class.
    fn has_trait(&self, name: &str) -> bool {
        self.class().has_trait(name)
    }

    /// Forward a view call to the relation.
    ///
    /// Non-restrictable commands and views the relation does not define both
    /// fail with `UnsupportedOperation`.
    fn forward(&self, method: &str, args: &[Value]) -> CommandResult<CommandRef> {
        match self.as_restrictable() {
            Some(restrictable) => restrictable.restrict_by(method, args),
            None => Err(CommandError::unsupported_operation(
                method,
                self.command_type().clone(),
            )),
        }
    }
}

/// Capability of commands whose relation can be narrowed.
pub trait Restrictable {
    /// Call `view` on the bound relation and return a command of the same
    /// class bound to the result.
    fn restrict_by(&self, view: &str, args: &[Value]) -> CommandResult<CommandRef>;
}
