//! Patch-style diff.

use rowmap_core::Record;

/// Entries of `proposed` whose value differs from `original`.
///
/// `proposed` is read as a partial patch: keys missing from it are never
/// part of the diff, keys missing from `original` always are.
pub fn diff(original: &Record, proposed: &Record) -> Record {
    proposed
        .iter()
        .filter(|(attr, value)| original.get(*attr) != Some(*value))
        .map(|(attr, value)| (attr.clone(), value.clone()))
        .collect()
}
