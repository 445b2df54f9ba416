//! Update command - merges changes into the rows its relation selects.

use crate::ops::{ensure_single_target, restrict_relation};
use crate::{Command, CommandClass, CommandError, CommandRef, CommandResult, Restrictable};
use rowmap_core::{Payload, ResultShape, Value};
use rowmap_relation::RelationRef;
use std::sync::Arc;
use tracing::trace;

/// Applies a single change record to every selected row.
#[derive(Debug)]
pub struct UpdateCommand {
    class: Arc<CommandClass>,
    relation: RelationRef,
    result: ResultShape,
}

impl UpdateCommand {
    pub fn new(class: Arc<CommandClass>, relation: RelationRef, result: ResultShape) -> Self {
        Self {
            class,
            relation,
            result,
        }
    }
}

impl Command for UpdateCommand {
    fn class(&self) -> &Arc<CommandClass> {
        &self.class
    }

    fn relation(&self) -> &RelationRef {
        &self.relation
    }

    fn result(&self) -> ResultShape {
        self.result
    }

    fn call(&self, input: Option<Payload>) -> CommandResult<Payload> {
        let changes = match input {
            Some(Payload::One(changes)) => changes,
            Some(Payload::Many(_)) => {
                return Err(CommandError::invalid_input(
                    self.class.name().clone(),
                    "expected a single change record",
                ))
            }
            None => return Err(CommandError::missing_input(self.class.name().clone())),
        };
        trace!(relation = %self.relation.signature(), command = %self.class.name(), "call");

        ensure_single_target(self.relation.as_ref(), self.result)?;
        let updated = self.relation.update(&changes)?;
        Ok(Payload::from_records(self.result, updated)?)
    }

    fn as_restrictable(&self) -> Option<&dyn Restrictable> {
        Some(self)
    }
}

impl Restrictable for UpdateCommand {
    fn restrict_by(&self, view: &str, args: &[Value]) -> CommandResult<CommandRef> {
        let relation = restrict_relation(self.relation.as_ref(), self.class.name(), view, args)?;
        Ok(Arc::new(Self::new(self.class.clone(), relation, self.result)))
    }
}
