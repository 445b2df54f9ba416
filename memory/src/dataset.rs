//! In-memory row storage.

use rowmap_core::{Record, Value};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Primary key allocator for rows inserted without a key.
///
/// `None` once `i64::MAX` has been handed out or observed.
#[derive(Debug, Clone)]
struct IdAllocator {
    next_id: Option<i64>,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_id: Some(1) }
    }

    fn alloc(&mut self) -> Option<i64> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        Some(id)
    }

    /// Keep future allocations above an explicitly supplied key.
    fn observe(&mut self, id: i64) {
        if let Some(next) = self.next_id {
            if id >= next {
                self.next_id = id.checked_add(1);
            }
        }
    }
}

/// Why an insert was rejected.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InsertError {
    DuplicateKey(Value),
    KeySpaceExhausted,
}

#[derive(Debug)]
struct DatasetState {
    rows: Vec<Record>,
    id_alloc: IdAllocator,
}

/// An ordered collection of rows.
///
/// Rows keep insertion order. All access goes through an `RwLock`, so a
/// dataset can be shared between relations on different threads.
#[derive(Debug)]
pub struct Dataset {
    name: String,
    state: RwLock<DatasetState>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(DatasetState {
                rows: Vec::new(),
                id_alloc: IdAllocator::new(),
            }),
        }
    }

    /// Dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    /// Returns true if no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of all rows.
    pub fn rows(&self) -> Vec<Record> {
        self.read().rows.clone()
    }

    /// Rows accepted by `filter`.
    pub(crate) fn select(&self, filter: impl Fn(&Record) -> bool) -> Vec<Record> {
        self.read().rows.iter().filter(|r| filter(r)).cloned().collect()
    }

    /// Insert rows, assigning an integer primary key to rows without one.
    ///
    /// Fails if a row collides with a stored row or an earlier row of the
    /// same batch, or if no key is left to assign. Nothing is inserted on
    /// failure.
    pub(crate) fn insert(
        &self,
        primary_key: &str,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, InsertError> {
        let mut state = self.write();

        let mut prepared: Vec<Record> = Vec::with_capacity(records.len());
        for record in records {
            if let Some(key) = record.get(primary_key).filter(|v| !v.is_null()) {
                let taken = state
                    .rows
                    .iter()
                    .chain(prepared.iter())
                    .any(|row| row.get(primary_key) == Some(key));
                if taken {
                    return Err(InsertError::DuplicateKey(key.clone()));
                }
            }
            prepared.push(record);
        }

        // Explicit keys first, so allocated ones cannot collide with them.
        let mut id_alloc = state.id_alloc.clone();
        for record in &prepared {
            if let Some(id) = record.get(primary_key).and_then(Value::as_int) {
                id_alloc.observe(id);
            }
        }
        for record in &mut prepared {
            let missing = record.get(primary_key).map_or(true, Value::is_null);
            if missing {
                let id = id_alloc.alloc().ok_or(InsertError::KeySpaceExhausted)?;
                record.insert(primary_key.to_string(), Value::Int(id));
            }
        }

        state.id_alloc = id_alloc;
        state.rows.extend(prepared.iter().cloned());
        Ok(prepared)
    }

    /// Merge `changes` into every accepted row, returning the updated rows.
    pub(crate) fn update(
        &self,
        filter: impl Fn(&Record) -> bool,
        changes: &Record,
    ) -> Vec<Record> {
        let mut state = self.write();
        let mut updated = Vec::new();
        for row in state.rows.iter_mut().filter(|r| filter(r)) {
            for (attr, value) in changes {
                row.insert(attr.clone(), value.clone());
            }
            updated.push(row.clone());
        }
        updated
    }

    /// Remove every accepted row, returning the removed rows.
    pub(crate) fn delete(&self, filter: impl Fn(&Record) -> bool) -> Vec<Record> {
        let mut state = self.write();
        let (removed, kept): (Vec<Record>, Vec<Record>) =
            std::mem::take(&mut state.rows).into_iter().partition(|r| filter(r));
        state.rows = kept;
        removed
    }

    // Rows are plain data; a panic mid-write cannot leave them half-linked.
    fn read(&self) -> RwLockReadGuard<'_, DatasetState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DatasetState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
