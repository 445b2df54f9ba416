//! Command classes - the resolved, cached configuration commands are built from.

use crate::CommandKind;
use rowmap_core::{CommandType, RelationName};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Configuration shared by every command built for one
/// (adapter, relation, command type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClass {
    name: CommandType,
    kind: CommandKind,
    relation: RelationName,
    adapter: Option<String>,
    traits: BTreeSet<String>,
}

impl CommandClass {
    /// Define a class registered as `name` for `relation`, based on `kind`.
    pub fn new(
        relation: impl Into<RelationName>,
        name: impl Into<CommandType>,
        kind: CommandKind,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            relation: relation.into(),
            adapter: None,
            traits: BTreeSet::new(),
        }
    }

    /// Pin the class to one adapter.
    pub fn for_adapter(mut self, adapter: impl Into<String>) -> Self {
        self.adapter = Some(adapter.into());
        self
    }

    /// Mark the class with a trait.
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.traits.insert(name.into());
        self
    }

    /// Mark the class in place (used by build hooks).
    pub fn mark(&mut self, name: impl Into<String>) {
        self.traits.insert(name.into());
    }

    pub fn name(&self) -> &CommandType {
        &self.name
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn relation(&self) -> &RelationName {
        &self.relation
    }

    pub fn adapter(&self) -> Option<&str> {
        self.adapter.as_deref()
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains(name)
    }

    pub fn traits(&self) -> impl Iterator<Item = &str> {
        self.traits.iter().map(String::as_str)
    }

    pub fn is_restrictable(&self) -> bool {
        self.kind.is_restrictable()
    }
}

/// What a build hook is told about the class being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEvent {
    pub adapter: String,
    pub gateway: String,
    pub dataset: String,
    pub relation: RelationName,
    pub command: CommandType,
}

/// Hook run on every command class before its first use.
pub type BuildHook = Arc<dyn Fn(&BuildEvent, &mut CommandClass) + Send + Sync>;
