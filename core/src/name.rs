//! Identifiers for relations and commands.
//!
//! Both are symbolic names that are:
//! - Cheap to clone and compare
//! - Usable as map keys
//! - Displayed without decoration

use std::borrow::Cow;
use std::fmt;

/// Identifier of a relation, e.g. `users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationName(Cow<'static, str>);

impl RelationName {
    /// Create a relation name from any string.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for RelationName {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for RelationName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&RelationName> for RelationName {
    fn from(name: &RelationName) -> Self {
        name.clone()
    }
}

/// Symbolic operation kind a command is registered under.
///
/// The three built-in kinds have constants; adapters and applications may
/// register any other name (`upsert`, `create_super`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandType(Cow<'static, str>);

impl CommandType {
    pub const CREATE: CommandType = CommandType(Cow::Borrowed("create"));
    pub const UPDATE: CommandType = CommandType(Cow::Borrowed("update"));
    pub const DELETE: CommandType = CommandType(Cow::Borrowed("delete"));

    /// Create a custom command type.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for CommandType {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for CommandType {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}
