//! Delete command - removes the rows its relation selects.

use crate::ops::{ensure_single_target, restrict_relation};
use crate::{Command, CommandClass, CommandRef, CommandResult, Restrictable};
use rowmap_core::{Payload, ResultShape, Value};
use rowmap_relation::RelationRef;
use std::sync::Arc;
use tracing::trace;

/// Deletes every row selected by the bound relation. Input is ignored.
#[derive(Debug)]
pub struct DeleteCommand {
    class: Arc<CommandClass>,
    relation: RelationRef,
    result: ResultShape,
}

impl DeleteCommand {
    pub fn new(class: Arc<CommandClass>, relation: RelationRef, result: ResultShape) -> Self {
        Self {
            class,
            relation,
            result,
        }
    }
}

impl Command for DeleteCommand {
    fn class(&self) -> &Arc<CommandClass> {
        &self.class
    }

    fn relation(&self) -> &RelationRef {
        &self.relation
    }

    fn result(&self) -> ResultShape {
        self.result
    }

    fn call(&self, _input: Option<Payload>) -> CommandResult<Payload> {
        trace!(relation = %self.relation.signature(), command = %self.class.name(), "call");

        ensure_single_target(self.relation.as_ref(), self.result)?;
        let deleted = self.relation.delete()?;
        Ok(Payload::from_records(self.result, deleted)?)
    }

    fn as_restrictable(&self) -> Option<&dyn Restrictable> {
        Some(self)
    }
}

impl Restrictable for DeleteCommand {
    fn restrict_by(&self, view: &str, args: &[Value]) -> CommandResult<CommandRef> {
        let relation = restrict_relation(self.relation.as_ref(), self.class.name(), view, args)?;
        Ok(Arc::new(Self::new(self.class.clone(), relation, self.result)))
    }
}
