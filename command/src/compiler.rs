//! The command compiler seam.

use crate::{CommandRef, CommandResult, CompileOptions};
use rowmap_core::CommandType;
use rowmap_relation::RelationRef;

/// Turns (relation, command type, options) into a command.
///
/// Implementations must be deterministic: the same inputs yield a command
/// bound to the same relation and command type. Whether the result is fresh
/// or built from a cached class is up to the implementation.
pub trait CommandCompiler: Send + Sync {
    fn compile(
        &self,
        relation: &RelationRef,
        command_type: &CommandType,
        options: &CompileOptions,
    ) -> CommandResult<CommandRef>;
}

impl<F> CommandCompiler for F
where
    F: Fn(&RelationRef, &CommandType, &CompileOptions) -> CommandResult<CommandRef> + Send + Sync,
{
    fn compile(
        &self,
        relation: &RelationRef,
        command_type: &CommandType,
        options: &CompileOptions,
    ) -> CommandResult<CommandRef> {
        self(relation, command_type, options)
    }
}
