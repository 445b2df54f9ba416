//! Changeset options.

use rowmap_command::CommandCompiler;
use rowmap_core::{CommandType, Payload, Record, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Options carried by a changeset.
///
/// `command_type` left unset means "use the class default". Arbitrary extra
/// keys are kept and propagated through [`ChangesetOptions::merge`].
#[derive(Clone, Default)]
pub struct ChangesetOptions {
    command_compiler: Option<Arc<dyn CommandCompiler>>,
    command_type: Option<CommandType>,
    data: Option<Payload>,
    original: Option<Record>,
    extra: BTreeMap<String, Value>,
}

impl ChangesetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command_compiler(self, compiler: impl CommandCompiler + 'static) -> Self {
        self.shared_compiler(Arc::new(compiler))
    }

    pub fn shared_compiler(mut self, compiler: Arc<dyn CommandCompiler>) -> Self {
        self.command_compiler = Some(compiler);
        self
    }

    pub fn command_type(mut self, command_type: impl Into<CommandType>) -> Self {
        self.command_type = Some(command_type.into());
        self
    }

    pub fn data(mut self, data: impl Into<Payload>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Current state of the tuple an update changeset is diffed against.
    pub fn original(mut self, original: Record) -> Self {
        self.original = Some(original);
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get_compiler(&self) -> Option<&Arc<dyn CommandCompiler>> {
        self.command_compiler.as_ref()
    }

    pub fn get_command_type(&self) -> Option<&CommandType> {
        self.command_type.as_ref()
    }

    pub fn get_data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    pub fn get_original(&self) -> Option<&Record> {
        self.original.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Combine with `other`, whose set entries win. Neither input changes.
    pub fn merge(&self, other: ChangesetOptions) -> ChangesetOptions {
        let mut extra = self.extra.clone();
        extra.extend(other.extra);

        ChangesetOptions {
            command_compiler: other
                .command_compiler
                .or_else(|| self.command_compiler.clone()),
            command_type: other.command_type.or_else(|| self.command_type.clone()),
            data: other.data.or_else(|| self.data.clone()),
            original: other.original.or_else(|| self.original.clone()),
            extra,
        }
    }
}

impl fmt::Debug for ChangesetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangesetOptions")
            .field("command_compiler", &self.command_compiler.is_some())
            .field("command_type", &self.command_type)
            .field("data", &self.data)
            .field("original", &self.original)
            .field("extra", &self.extra)
            .finish()
    }
}
