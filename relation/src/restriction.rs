//! Restrictions narrow a relation to the rows matching a predicate.

use rowmap_core::{RelationName, Value};
use std::fmt;

/// Predicate applied to one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Attribute equals the value.
    Eq(Value),
    /// Attribute equals any of the values.
    In(Vec<Value>),
    /// String attribute matches the pattern.
    Matches(String),
}

/// A single restriction: `attribute <predicate>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
    pub attribute: String,
    pub predicate: Predicate,
}

impl Restriction {
    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            predicate: Predicate::Eq(value.into()),
        }
    }

    pub fn one_of(attribute: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            predicate: Predicate::In(values),
        }
    }

    pub fn matches(attribute: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            predicate: Predicate::Matches(pattern.into()),
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::Eq(value) => write!(f, "{} = {}", self.attribute, value),
            Predicate::In(values) => {
                write!(f, "{} IN {}", self.attribute, Value::List(values.clone()))
            }
            Predicate::Matches(pattern) => write!(f, "{} =~ /{}/", self.attribute, pattern),
        }
    }
}

/// Structural identity of a relation: its name and the restrictions applied
/// to it, in order.
///
/// Two handles with equal signatures read and write the same rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationSignature {
    pub name: RelationName,
    pub restrictions: Vec<Restriction>,
}

impl RelationSignature {
    pub fn new(name: RelationName) -> Self {
        Self {
            name,
            restrictions: Vec::new(),
        }
    }

    pub fn with(mut self, restriction: Restriction) -> Self {
        self.restrictions.push(restriction);
        self
    }
}

impl fmt::Display for RelationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for restriction in &self.restrictions {
            write!(f, "[{}]", restriction)?;
        }
        Ok(())
    }
}
