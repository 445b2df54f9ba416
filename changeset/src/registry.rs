//! Process-wide cache of relation-specialized changeset classes.
//!
//! Keyed by (relation, base class). Entries are created under the lock, so
//! concurrent first requests for the same key observe one class. Entries
//! are never evicted; the key space is bounded by relations times classes.

use crate::ChangesetClass;
use crate::ClassId;
use rowmap_core::RelationName;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

type SpecializationKey = (RelationName, ClassId);
type SpecializationMap = HashMap<SpecializationKey, Arc<ChangesetClass>>;

static SPECIALIZATIONS: OnceLock<Mutex<SpecializationMap>> = OnceLock::new();

// Entries are immutable once inserted, so a poisoned lock is still consistent.
fn specializations() -> MutexGuard<'static, SpecializationMap> {
    SPECIALIZATIONS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Return the class of `base` bound to `relation`, creating it on first use.
///
/// Repeated calls with equal arguments return the same `Arc`.
pub fn specialize(base: &Arc<ChangesetClass>, relation: RelationName) -> Arc<ChangesetClass> {
    let mut cache = specializations();
    cache
        .entry((relation.clone(), base.id()))
        .or_insert_with(|| {
            debug!(relation = %relation, base = %base.name(), "specialized changeset class");
            Arc::new(base.specialized(relation))
        })
        .clone()
}

/// Number of specializations created so far in this process.
pub fn specialization_count() -> usize {
    specializations().len()
}
