//! The changeset itself.

use crate::{diff, ChangesetClass, ChangesetError, ChangesetOptions, ChangesetResult};
use rowmap_command::{Command, CommandCompiler, CompileOptions};
use rowmap_core::{CommandType, Payload, Record, ResultShape, Value};
use rowmap_relation::RelationRef;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, instrument};

/// A pending write against one relation.
///
/// Construction never touches the relation. [`Changeset::commit`] compiles
/// the command through the configured compiler and calls it.
#[derive(Debug, Clone)]
pub struct Changeset {
    class: Arc<ChangesetClass>,
    relation: RelationRef,
    options: ChangesetOptions,
    command_type: CommandType,
    diff: OnceLock<Record>,
}

impl Changeset {
    /// Build a changeset of `class` over `relation`.
    ///
    /// The command type resolves to the explicit option when present, else
    /// to the class default. Fails if `class` is bound to a different relation.
    pub fn new(
        class: Arc<ChangesetClass>,
        relation: RelationRef,
        options: ChangesetOptions,
    ) -> ChangesetResult<Self> {
        if let Some(bound) = class.relation() {
            if bound != relation.name() {
                return Err(ChangesetError::configuration(format!(
                    "{} is bound to relation {}, got {}",
                    class.name(),
                    bound,
                    relation.name()
                )));
            }
        }

        let command_type = options
            .get_command_type()
            .cloned()
            .unwrap_or_else(|| class.default_command_type().clone());

        Ok(Self {
            class,
            relation,
            options,
            command_type,
            diff: OnceLock::new(),
        })
    }

    /// A new changeset of the same class and relation with `options` merged
    /// over the current ones. `self` is unchanged.
    pub fn with(&self, options: ChangesetOptions) -> ChangesetResult<Changeset> {
        if self.class.relation().is_none() {
            return Err(ChangesetError::configuration(format!(
                "{} has no relation; specialize it before calling with",
                self.class.name()
            )));
        }
        Changeset::new(
            self.class.clone(),
            self.relation.clone(),
            self.options.merge(options),
        )
    }

    /// Shorthand for `with` setting only the data.
    pub fn with_data(&self, data: impl Into<Payload>) -> ChangesetResult<Changeset> {
        self.with(ChangesetOptions::new().data(data))
    }

    /// Execute the write and return what the command returned.
    ///
    /// A stateful changeset whose data matches its original returns the
    /// original without compiling or calling anything.
    #[instrument(
        skip(self),
        fields(relation = %self.relation.name(), command = %self.command_type)
    )]
    pub fn commit(&self) -> ChangesetResult<Payload> {
        let input = match (self.diff(), self.options.get_original()) {
            (Some(changes), Some(original)) if changes.is_empty() => {
                debug!("no changes; skipping command");
                return Ok(Payload::One(original.clone()));
            }
            (Some(changes), _) => Some(Payload::One(changes.clone())),
            _ if !self.class.uses_data() => None,
            _ => self.options.get_data().cloned(),
        };

        let compiler = self
            .options
            .get_compiler()
            .ok_or_else(|| ChangesetError::missing_command_compiler(self.relation.name().clone()))?;
        let command = compiler.compile(
            &self.relation,
            &self.command_type,
            &CompileOptions::new(self.result()),
        )?;

        Ok(command.call(input)?)
    }

    /// `One` when the data is a single record, `Many` otherwise (including
    /// when there is no data, or the class ignores it).
    pub fn result(&self) -> ResultShape {
        if !self.class.uses_data() {
            return ResultShape::Many;
        }
        match self.options.get_data() {
            Some(Payload::One(_)) => ResultShape::One,
            _ => ResultShape::Many,
        }
    }

    /// Changes relative to the original, for stateful changesets holding a
    /// single record and an original. Computed once.
    pub fn diff(&self) -> Option<&Record> {
        if !self.class.is_stateful() {
            return None;
        }
        let original = self.options.get_original()?;
        let proposed = self.options.get_data()?.as_one()?;
        Some(self.diff.get_or_init(|| diff(original, proposed)))
    }

    /// Whether committing would write anything. Stateless changesets always do.
    pub fn has_changes(&self) -> bool {
        self.diff().map_or(true, |changes| !changes.is_empty())
    }

    /// Changesets expose no relation views.
    pub fn forward(&self, method: &str, _args: &[Value]) -> ChangesetResult<Changeset> {
        Err(ChangesetError::unsupported_operation(
            method,
            self.relation.name().clone(),
        ))
    }

    pub fn class(&self) -> &Arc<ChangesetClass> {
        &self.class
    }

    pub fn relation(&self) -> &RelationRef {
        &self.relation
    }

    pub fn options(&self) -> &ChangesetOptions {
        &self.options
    }

    pub fn command_type(&self) -> &CommandType {
        &self.command_type
    }

    pub fn data(&self) -> Option<&Payload> {
        self.options.get_data()
    }

    pub fn original(&self) -> Option<&Record> {
        self.options.get_original()
    }
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Changeset relation={}>", self.relation.name())
    }
}
