//! rowmap Relation
//!
//! The capability set a datastore collection exposes to the write pipeline.
//!
//! Responsibilities:
//! - Name the relation and the adapter/gateway/dataset behind it
//! - Narrow a relation with restrictions and named views
//! - Perform the raw writes commands are built on
//!
//! # Module Structure
//!
//! - `relation` - The `Relation` trait and `RelationRef` handle
//! - `restriction` - Restriction predicates and relation signatures
//! - `error` - Error types for adapter failures

mod error;
mod relation;
mod restriction;

pub use error::{RelationError, RelationResult};
pub use relation::{Relation, RelationRef};
pub use restriction::{Predicate, Restriction, RelationSignature};
