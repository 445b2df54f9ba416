//! Changeset classes.
//!
//! A `ChangesetClass` is an immutable value describing a kind of changeset:
//! which command type it commits through by default, whether it diffs
//! against an original, and (once specialized) which relation it is bound to.
//! Classes form a single-inheritance tree rooted at [`ChangesetClass::changeset`].

use crate::registry;
use crate::{Changeset, ChangesetOptions, ChangesetResult};
use rowmap_core::{CommandType, RelationName};
use rowmap_relation::RelationRef;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a changeset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    fn next() -> Self {
        Self(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct ChangesetClass {
    id: ClassId,
    name: String,
    parent: Option<Arc<ChangesetClass>>,
    relation: Option<RelationName>,
    default_command_type: CommandType,
    stateful: bool,
    uses_data: bool,
}

impl ChangesetClass {
    /// The abstract root. Commits as `create` unless told otherwise.
    pub fn changeset() -> Arc<Self> {
        static BASE: OnceLock<Arc<ChangesetClass>> = OnceLock::new();
        BASE.get_or_init(|| Arc::new(Self::root("Changeset", CommandType::CREATE, false)))
            .clone()
    }

    pub fn create() -> Arc<Self> {
        static CREATE: OnceLock<Arc<ChangesetClass>> = OnceLock::new();
        CREATE
            .get_or_init(|| Self::changeset().subclass("Changeset::Create").build())
            .clone()
    }

    /// Stateful: carries the original tuple and commits only the diff.
    pub fn update() -> Arc<Self> {
        static UPDATE: OnceLock<Arc<ChangesetClass>> = OnceLock::new();
        UPDATE
            .get_or_init(|| {
                Self::changeset()
                    .subclass("Changeset::Update")
                    .default_command_type(CommandType::UPDATE)
                    .stateful(true)
                    .build()
            })
            .clone()
    }

    /// Deletes what its relation selects; data never reaches the command.
    pub fn delete() -> Arc<Self> {
        static DELETE: OnceLock<Arc<ChangesetClass>> = OnceLock::new();
        DELETE
            .get_or_init(|| {
                Self::changeset()
                    .subclass("Changeset::Delete")
                    .default_command_type(CommandType::DELETE)
                    .uses_data(false)
                    .build()
            })
            .clone()
    }

    fn root(name: &str, default_command_type: CommandType, stateful: bool) -> Self {
        Self {
            id: ClassId::next(),
            name: name.to_string(),
            parent: None,
            relation: None,
            default_command_type,
            stateful,
            uses_data: true,
        }
    }

    /// Start a subclass that inherits relation, default command type,
    /// statefulness and data handling from `self`.
    pub fn subclass(self: &Arc<Self>, name: impl Into<String>) -> SubclassBuilder {
        SubclassBuilder {
            parent: self.clone(),
            name: name.into(),
            relation: self.relation.clone(),
            default_command_type: self.default_command_type.clone(),
            stateful: self.stateful,
            uses_data: self.uses_data,
        }
    }

    /// The class bound to `relation`, shared by every caller in the process.
    pub fn for_relation(self: &Arc<Self>, relation: impl Into<RelationName>) -> Arc<Self> {
        registry::specialize(self, relation.into())
    }

    /// Build the specialization itself. Only the registry calls this.
    pub(crate) fn specialized(self: &Arc<Self>, relation: RelationName) -> Self {
        Self {
            id: ClassId::next(),
            name: format!("{}[{}]", self.name, relation),
            parent: Some(self.clone()),
            relation: Some(relation),
            default_command_type: self.default_command_type.clone(),
            stateful: self.stateful,
            uses_data: self.uses_data,
        }
    }

    /// Instantiate a changeset of this class.
    pub fn new_changeset(
        self: &Arc<Self>,
        relation: RelationRef,
        options: ChangesetOptions,
    ) -> ChangesetResult<Changeset> {
        Changeset::new(self.clone(), relation, options)
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ChangesetClass>> {
        self.parent.as_ref()
    }

    pub fn relation(&self) -> Option<&RelationName> {
        self.relation.as_ref()
    }

    pub fn default_command_type(&self) -> &CommandType {
        &self.default_command_type
    }

    pub fn is_stateful(&self) -> bool {
        self.stateful
    }

    /// False when commits ignore the changeset's data.
    pub fn uses_data(&self) -> bool {
        self.uses_data
    }

    /// True if `self` is `other` or one of its descendants.
    pub fn is_a(&self, other: &ChangesetClass) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class.id == other.id {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }
}

impl fmt::Display for ChangesetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for custom changeset classes.
#[derive(Debug)]
pub struct SubclassBuilder {
    parent: Arc<ChangesetClass>,
    name: String,
    relation: Option<RelationName>,
    default_command_type: CommandType,
    stateful: bool,
    uses_data: bool,
}

impl SubclassBuilder {
    pub fn default_command_type(mut self, command_type: impl Into<CommandType>) -> Self {
        self.default_command_type = command_type.into();
        self
    }

    /// Bind the subclass to a relation up front.
    pub fn relation(mut self, relation: impl Into<RelationName>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn stateful(mut self, stateful: bool) -> Self {
        self.stateful = stateful;
        self
    }

    pub fn uses_data(mut self, uses_data: bool) -> Self {
        self.uses_data = uses_data;
        self
    }

    pub fn build(self) -> Arc<ChangesetClass> {
        Arc::new(ChangesetClass {
            id: ClassId::next(),
            name: self.name,
            parent: Some(self.parent),
            relation: self.relation,
            default_command_type: self.default_command_type,
            stateful: self.stateful,
            uses_data: self.uses_data,
        })
    }
}
