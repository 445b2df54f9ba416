//! rowmap Core Types
//!
//! This crate provides the foundational types shared by every rowmap crate:
//! - Value types (the Value enum with all scalar and list types)
//! - Records and payloads (Record, Payload, ResultShape)
//! - Identifiers (RelationName, CommandType)
//! - Shape errors raised when a payload has the wrong cardinality

mod error;
mod name;
mod record;
mod value;

pub use error::*;
pub use name::*;
pub use record::*;
pub use value::*;
