//! The relation handle.

use crate::{RelationResult, RelationSignature, Restriction};
use rowmap_core::{Record, RelationName, Value};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a relation.
pub type RelationRef = Arc<dyn Relation>;

/// A queryable, restrictable view over one datastore collection.
///
/// Relations are values: restricting one returns a new handle and leaves the
/// receiver untouched. Writes go through the handle and only touch the rows
/// the handle's restrictions select.
pub trait Relation: fmt::Debug + Send + Sync {
    /// Relation identifier.
    fn name(&self) -> &RelationName;

    /// Adapter identifier (`memory`, `sql`, ...).
    fn adapter(&self) -> &str;

    /// Gateway the relation's dataset lives in.
    fn gateway(&self) -> &str;

    /// Dataset backing the relation.
    fn dataset(&self) -> &str;

    /// Primary key attribute.
    fn primary_key(&self) -> &str {
        "id"
    }

    /// Name plus applied restrictions.
    fn signature(&self) -> RelationSignature;

    /// Narrow the relation.
    fn restrict(&self, restriction: Restriction) -> RelationRef;

    /// Names of the custom views (finders) this relation defines.
    fn view_names(&self) -> Vec<&str>;

    /// Call a view by name.
    ///
    /// Returns `None` when the relation defines no such view. Only views are
    /// reachable this way; other relation methods are not.
    fn view(&self, name: &str, args: &[Value]) -> Option<RelationResult<RelationRef>>;

    /// Whether `name` is a view of this relation.
    fn has_view(&self, name: &str) -> bool {
        self.view_names().contains(&name)
    }

    /// Read all rows selected by this handle.
    fn to_vec(&self) -> RelationResult<Vec<Record>>;

    /// Insert records, returning them as stored.
    fn insert(&self, records: Vec<Record>) -> RelationResult<Vec<Record>>;

    /// Merge `changes` into every selected row, returning the updated rows.
    fn update(&self, changes: &Record) -> RelationResult<Vec<Record>>;

    /// Remove every selected row, returning the removed rows.
    fn delete(&self) -> RelationResult<Vec<Record>>;
}
