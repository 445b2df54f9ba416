//! rowmap Memory Adapter
//!
//! This crate provides an in-memory datastore behind the `Relation` trait:
//! - Gateway: named datasets
//! - Dataset: ordered rows with an integer primary key allocator
//! - Relation: restrictions, named views, and restricted writes
//! - Filter: restrictions compiled into a row predicate

mod dataset;
mod filter;
mod gateway;
mod relation;

pub use dataset::Dataset;
pub use gateway::MemoryGateway;
pub use relation::{MemoryRelation, RelationBuilder, ViewFn};

/// Adapter identifier reported by memory relations.
pub const ADAPTER: &str = "memory";
