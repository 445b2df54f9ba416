//! rowmap Changeset
//!
//! Declarative write operations that resolve to a command on commit.
//!
//! Responsibilities:
//! - Define changeset classes (create, update, delete, custom subclasses)
//! - Specialize classes per relation, once per process
//! - Merge options without mutating the receiver
//! - Diff updates against the current state and skip empty ones
//! - Compile and call the command on commit
//!
//! # Module Structure
//!
//! - `class` - `ChangesetClass` value objects and subclassing
//! - `registry` - Process-wide specialization cache
//! - `options` - `ChangesetOptions`
//! - `changeset` - The `Changeset` itself
//! - `diff` - Patch-style diff of proposed data against current state
//! - `error` - Error types for changeset failures

mod changeset;
mod class;
mod diff;
mod error;
mod options;
mod registry;

pub use changeset::Changeset;
pub use class::{ChangesetClass, ClassId, SubclassBuilder};
pub use diff::diff;
pub use error::{ChangesetError, ChangesetResult};
pub use options::ChangesetOptions;
pub use registry::{specialization_count, specialize};
