//! Create command - inserts records.

use crate::{Command, CommandClass, CommandError, CommandResult};
use rowmap_core::{Payload, ResultShape};
use rowmap_relation::RelationRef;
use std::sync::Arc;
use tracing::trace;

/// Inserts its input into the relation and returns the stored records.
#[derive(Debug)]
pub struct CreateCommand {
    class: Arc<CommandClass>,
    relation: RelationRef,
    result: ResultShape,
}

impl CreateCommand {
    pub fn new(class: Arc<CommandClass>, relation: RelationRef, result: ResultShape) -> Self {
        Self {
            class,
            relation,
            result,
        }
    }
}

impl Command for CreateCommand {
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
        let input =
            input.ok_or_else(|| CommandError::missing_input(self.class.name().clone()))?;
        trace!(
            relation = %self.relation.name(),
            command = %self.class.name(),
            records = input.len(),
            "call"
        );

        let inserted = self.relation.insert(input.into_records())?;
        Ok(Payload::from_records(self.result, inserted)?)
    }
}
