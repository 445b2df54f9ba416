//! rowmap Repository
//!
//! Facade tying relations, a command compiler and changesets together.
//!
//! A repository owns a set of named relations and one compiler; every
//! changeset it builds carries that compiler, so `commit()` works without
//! further wiring.

mod error;
mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use repository::{Repository, RepositoryBuilder};
