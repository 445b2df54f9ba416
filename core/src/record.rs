//! Records and payloads.
//!
//! A record is a flat attribute map, the unit a relation stores. Writes carry
//! either a single record or a batch of records; the shape of what goes in
//! decides the shape of what comes back.

use crate::{ShapeError, ShapeResult, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Type alias for a single row of attributes.
pub type Record = BTreeMap<String, Value>;

/// Helper macro to create records.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut record = $crate::Record::new();
            $(
                record.insert($key.to_string(), $crate::Value::from($value));
            )+
            record
        }
    };
}

/// Whether a write produces one record or many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    One,
    Many,
}

impl fmt::Display for ResultShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultShape::One => write!(f, "one"),
            ResultShape::Many => write!(f, "many"),
        }
    }
}

/// Input or output of a write: a single record or an ordered batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    One(Record),
    Many(Vec<Record>),
}

impl Payload {
    /// Shape this payload reports.
    ///
    /// An empty batch is still `Many`.
    pub fn shape(&self) -> ResultShape {
        match self {
            Payload::One(_) => ResultShape::One,
            Payload::Many(_) => ResultShape::Many,
        }
    }

    /// Number of records carried.
    pub fn len(&self) -> usize {
        match self {
            Payload::One(_) => 1,
            Payload::Many(records) => records.len(),
        }
    }

    /// Returns true for an empty batch.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the record if this is a single-record payload.
    pub fn as_one(&self) -> Option<&Record> {
        match self {
            Payload::One(record) => Some(record),
            Payload::Many(_) => None,
        }
    }

    /// Get the records if this is a batch.
    pub fn as_many(&self) -> Option<&[Record]> {
        match self {
            Payload::One(_) => None,
            Payload::Many(records) => Some(records),
        }
    }

    /// Flatten into a list of records regardless of shape.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Payload::One(record) => vec![record],
            Payload::Many(records) => records,
        }
    }

    /// Shape a list of records according to `shape`.
    ///
    /// `One` requires exactly one record.
    pub fn from_records(shape: ResultShape, mut records: Vec<Record>) -> ShapeResult<Self> {
        match shape {
            ResultShape::Many => Ok(Payload::Many(records)),
            ResultShape::One if records.len() == 1 => Ok(Payload::One(records.remove(0))),
            ResultShape::One => Err(ShapeError::tuple_count_mismatch(
                ResultShape::One,
                records.len(),
            )),
        }
    }
}

impl From<Record> for Payload {
    fn from(record: Record) -> Self {
        Payload::One(record)
    }
}

impl From<Vec<Record>> for Payload {
    fn from(records: Vec<Record>) -> Self {
        Payload::Many(records)
    }
}
