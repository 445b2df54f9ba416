//! CommandRegistry - the stock command compiler.
//!
//! Commands are looked up by (relation, command type). Explicit definitions
//! win; the three built-in types (`create`, `update`, `delete`) are defined
//! implicitly for every relation. The resolved `CommandClass` is built once
//! per (adapter, relation, command type), passed through every build hook,
//! and cached for the registry's lifetime.

use crate::{
    BuildEvent, BuildHook, CommandClass, CommandCompiler, CommandError, CommandKind, CommandRef,
    CommandResult, CompileOptions, CreateCommand, DeleteCommand, UpdateCommand,
};
use rowmap_core::{CommandType, RelationName};
use rowmap_relation::RelationRef;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

type ClassKey = (String, RelationName, CommandType);

/// Builder for constructing a CommandRegistry.
#[derive(Default)]
pub struct CommandRegistryBuilder {
    definitions: HashMap<(RelationName, CommandType), CommandClass>,
    hooks: Vec<BuildHook>,
}

impl CommandRegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a command `name` for `relation`, based on `kind`.
    pub fn define(
        &mut self,
        relation: impl Into<RelationName>,
        name: impl Into<CommandType>,
        kind: CommandKind,
    ) -> DefinitionBuilder<'_> {
        DefinitionBuilder {
            builder: self,
            class: CommandClass::new(relation, name, kind),
        }
    }

    /// Register an explicitly built command class.
    pub fn register(&mut self, class: CommandClass) -> CommandResult<()> {
        let key = (class.relation().clone(), class.name().clone());
        if self.definitions.contains_key(&key) {
            return Err(CommandError::duplicate_command(key.0, key.1));
        }
        self.definitions.insert(key, class);
        Ok(())
    }

    /// Run `hook` on every command class before its first use.
    pub fn before_build<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&BuildEvent, &mut CommandClass) + Send + Sync + 'static,
    {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Build the registry.
    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            definitions: self.definitions,
            hooks: self.hooks,
            classes: Mutex::new(HashMap::new()),
        }
    }
}

/// Builder for a single command definition.
pub struct DefinitionBuilder<'a> {
    builder: &'a mut CommandRegistryBuilder,
    class: CommandClass,
}

impl<'a> DefinitionBuilder<'a> {
    /// Mark commands of this definition with a trait.
    pub fn with_trait(mut self, name: impl Into<String>) -> Self {
        self.class = self.class.with_trait(name);
        self
    }

    /// Only compile this command for relations of `adapter`.
    pub fn adapter(mut self, adapter: impl Into<String>) -> Self {
        self.class = self.class.for_adapter(adapter);
        self
    }

    /// Finish the definition.
    pub fn done(self) -> CommandResult<()> {
        self.builder.register(self.class)
    }
}

/// Compiles commands from definitions, caching their classes.
pub struct CommandRegistry {
    definitions: HashMap<(RelationName, CommandType), CommandClass>,
    hooks: Vec<BuildHook>,
    classes: Mutex<HashMap<ClassKey, Arc<CommandClass>>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        CommandRegistryBuilder::new().build()
    }
}

impl CommandRegistry {
    /// Start building a registry.
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::new()
    }

    /// Get a command with default options.
    pub fn command(
        &self,
        relation: &RelationRef,
        name: impl Into<CommandType>,
    ) -> CommandResult<CommandRef> {
        self.compile(relation, &name.into(), &CompileOptions::default())
    }

    /// Resolve the class for (relation, command type), building and caching
    /// it on first use.
    pub fn class_for(
        &self,
        relation: &RelationRef,
        command_type: &CommandType,
    ) -> CommandResult<Arc<CommandClass>> {
        let key: ClassKey = (
            relation.adapter().to_string(),
            relation.name().clone(),
            command_type.clone(),
        );
        if let Some(class) = self.lock_classes().get(&key) {
            return Ok(class.clone());
        }

        let mut class = self.definition(relation, command_type)?;
        if let Some(expected) = class.adapter() {
            if expected != relation.adapter() {
                return Err(CommandError::adapter_mismatch(
                    command_type.clone(),
                    expected,
                    relation.adapter(),
                ));
            }
        }

        let event = BuildEvent {
            adapter: relation.adapter().to_string(),
            gateway: relation.gateway().to_string(),
            dataset: relation.dataset().to_string(),
            relation: relation.name().clone(),
            command: command_type.clone(),
        };
        // Hooks run outside the lock; a concurrent build of the same key
        // loses to whichever insert lands first.
        for hook in &self.hooks {
            hook(&event, &mut class);
        }
        debug!(
            adapter = %event.adapter,
            relation = %event.relation,
            command = %event.command,
            "built command class"
        );

        let class = self
            .lock_classes()
            .entry(key)
            .or_insert_with(|| Arc::new(class))
            .clone();
        Ok(class)
    }

    /// Number of cached classes.
    pub fn class_count(&self) -> usize {
        self.lock_classes().len()
    }

    fn definition(
        &self,
        relation: &RelationRef,
        command_type: &CommandType,
    ) -> CommandResult<CommandClass> {
        let name = relation.name();
        if let Some(class) = self.definitions.get(&(name.clone(), command_type.clone())) {
            return Ok(class.clone());
        }
        CommandKind::from_command_type(command_type)
            .map(|kind| CommandClass::new(name.clone(), command_type.clone(), kind))
            .ok_or_else(|| CommandError::unknown_command(name.clone(), command_type.clone()))
    }

    // The map only holds immutable `Arc`s, so a poisoned lock is still consistent.
    fn lock_classes(&self) -> std::sync::MutexGuard<'_, HashMap<ClassKey, Arc<CommandClass>>> {
        self.classes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CommandCompiler for CommandRegistry {
    fn compile(
        &self,
        relation: &RelationRef,
        command_type: &CommandType,
        options: &CompileOptions,
    ) -> CommandResult<CommandRef> {
        let class = self.class_for(relation, command_type)?;
        let relation = relation.clone();
        let command: CommandRef = match class.kind() {
            CommandKind::Create => Arc::new(CreateCommand::new(class, relation, options.result)),
            CommandKind::Update => Arc::new(UpdateCommand::new(class, relation, options.result)),
            CommandKind::Delete => Arc::new(DeleteCommand::new(class, relation, options.result)),
        };
        Ok(command)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("definitions", &self.definitions.len())
            .field("hooks", &self.hooks.len())
            .field("classes", &self.class_count())
            .finish()
    }
}
