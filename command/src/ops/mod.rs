//! Built-in command implementations.
//!
//! Each kind (create, update, delete) is implemented in its own module.
//! Update and delete are restrictable; create is not.

mod create;
mod delete;
mod update;

pub use create::CreateCommand;
pub use delete::DeleteCommand;
pub use update::UpdateCommand;

use crate::{CommandError, CommandResult};
use rowmap_core::{CommandType, ResultShape, ShapeError, Value};
use rowmap_relation::{Relation, RelationRef};

/// Fail before writing when a `One` result would not select exactly one row.
pub(crate) fn ensure_single_target(
    relation: &dyn Relation,
    result: ResultShape,
) -> CommandResult<()> {
    if result == ResultShape::Many {
        return Ok(());
    }
    let selected = relation.to_vec()?.len();
    if selected != 1 {
        return Err(ShapeError::tuple_count_mismatch(ResultShape::One, selected).into());
    }
    Ok(())
}

/// Resolve `view` on `relation`, failing like an undefined method when the
/// relation has no such view.
pub(crate) fn restrict_relation(
    relation: &dyn Relation,
    command: &CommandType,
    view: &str,
    args: &[Value],
) -> CommandResult<RelationRef> {
    match relation.view(view, args) {
        Some(restricted) => Ok(restricted?),
        None => Err(CommandError::unsupported_operation(view, command.clone())),
    }
}
