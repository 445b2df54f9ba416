//! Repository.

use crate::{RepositoryError, RepositoryResult};
use rowmap_changeset::{Changeset, ChangesetClass, ChangesetOptions};
use rowmap_command::{CommandCompiler, CommandRef, CommandRegistry, CompileOptions};
use rowmap_core::{CommandType, Payload, Record, RelationName, Value};
use rowmap_relation::{Relation, RelationRef, Restriction};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builder for a [`Repository`].
#[derive(Default)]
pub struct RepositoryBuilder {
    /// Registered relations by name.
    relations: BTreeMap<RelationName, RelationRef>,
    /// Compiler handed to every changeset; a default registry when unset.
    compiler: Option<Arc<dyn CommandCompiler>>,
}

impl RepositoryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relation under its own name.
    pub fn relation(mut self, relation: RelationRef) -> RepositoryResult<Self> {
        let name = relation.name().clone();
        if self.relations.contains_key(&name) {
            return Err(RepositoryError::duplicate_relation(name));
        }
        self.relations.insert(name, relation);
        Ok(self)
    }

    /// Use a command registry as the compiler.
    pub fn commands(self, registry: CommandRegistry) -> Self {
        self.compiler(Arc::new(registry))
    }

    /// Use any compiler.
    pub fn compiler(mut self, compiler: Arc<dyn CommandCompiler>) -> Self {
        self.compiler = Some(compiler);
        self
    }

    /// Build the repository.
    pub fn build(self) -> Repository {
        let compiler = self
            .compiler
            .unwrap_or_else(|| Arc::new(CommandRegistry::default()));
        debug!(relations = self.relations.len(), "built repository");
        Repository {
            relations: self.relations,
            compiler,
        }
    }
}

/// Named relations plus the compiler their changesets commit through.
pub struct Repository {
    /// Registered relations by name.
    relations: BTreeMap<RelationName, RelationRef>,
    /// Shared command compiler.
    compiler: Arc<dyn CommandCompiler>,
}

impl Repository {
    /// Start building a repository.
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::new()
    }

    /// Get a relation by name.
    pub fn relation(&self, name: &str) -> RepositoryResult<&RelationRef> {
        self.relations
            .get(&RelationName::new(name.to_string()))
            .ok_or_else(|| RepositoryError::unknown_relation(name))
    }

    /// Names of all registered relations, sorted.
    pub fn relation_names(&self) -> impl Iterator<Item = &RelationName> {
        self.relations.keys()
    }

    /// Get the compiler.
    pub fn compiler(&self) -> &Arc<dyn CommandCompiler> {
        &self.compiler
    }

    /// Compile a command directly, bypassing changesets.
    pub fn command(
        &self,
        relation: &str,
        command_type: impl Into<CommandType>,
    ) -> RepositoryResult<CommandRef> {
        let relation = self.relation(relation)?;
        Ok(self
            .compiler
            .compile(relation, &command_type.into(), &CompileOptions::default())?)
    }

    /// A create changeset inserting `data` into `relation`.
    pub fn changeset(
        &self,
        relation: &str,
        data: impl Into<Payload>,
    ) -> RepositoryResult<Changeset> {
        let relation = self.relation(relation)?.clone();
        let class = ChangesetClass::create().for_relation(relation.name());
        self.build_changeset(&class, relation, ChangesetOptions::new().data(data))
    }

    /// An update changeset for the record with primary key `key`.
    ///
    /// The current record is loaded as the original, so committing writes
    /// only the attributes `data` actually changes.
    pub fn update_changeset(
        &self,
        relation: &str,
        key: impl Into<Value>,
        data: Record,
    ) -> RepositoryResult<Changeset> {
        let key = key.into();
        let (restricted, original) = self.find_by_pk(relation, key)?;
        let class = ChangesetClass::update().for_relation(restricted.name());
        self.build_changeset(
            &class,
            restricted,
            ChangesetOptions::new().original(original).data(data),
        )
    }

    /// A delete changeset removing every row `relation` selects.
    pub fn delete_changeset(&self, relation: RelationRef) -> RepositoryResult<Changeset> {
        let class = ChangesetClass::delete().for_relation(relation.name());
        self.build_changeset(&class, relation, ChangesetOptions::new())
    }

    /// A changeset of any class, carrying this repository's compiler.
    pub fn changeset_of(
        &self,
        class: &Arc<ChangesetClass>,
        relation: RelationRef,
        options: ChangesetOptions,
    ) -> RepositoryResult<Changeset> {
        self.build_changeset(class, relation, options)
    }

    fn build_changeset(
        &self,
        class: &Arc<ChangesetClass>,
        relation: RelationRef,
        options: ChangesetOptions,
    ) -> RepositoryResult<Changeset> {
        let options = ChangesetOptions::new()
            .shared_compiler(self.compiler.clone())
            .merge(options);
        Ok(class.new_changeset(relation, options)?)
    }

    fn find_by_pk(&self, relation: &str, key: Value) -> RepositoryResult<(RelationRef, Record)> {
        let relation = self.relation(relation)?;
        let restricted = match relation.view("by_pk", std::slice::from_ref(&key)) {
            Some(restricted) => restricted?,
            None => {
                let pk = relation.primary_key().to_string();
                relation.restrict(Restriction::eq(pk, key.clone()))
            }
        };
        let original = restricted
            .to_vec()?
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::record_not_found(relation.name().clone(), key))?;
        Ok((restricted, original))
    }
}

impl fmt::Debug for RepositoryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryBuilder")
            .field("relations", &self.relations.keys().collect::<Vec<_>>())
            .field("compiler", &self.compiler.is_some())
            .finish()
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("relations", &self.relations.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
