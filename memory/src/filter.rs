//! Restrictions compiled into a row predicate.

use regex_lite::Regex;
use rowmap_core::{Record, Value};
use rowmap_relation::{Predicate, RelationError, RelationResult, Restriction};

enum Check {
    Eq(Value),
    In(Vec<Value>),
    Matches(Regex),
}

/// Conjunction of compiled restrictions.
pub(crate) struct RowFilter {
    checks: Vec<(String, Check)>,
}

impl RowFilter {
    /// Compile restrictions. Fails on an invalid `matches` pattern.
    pub(crate) fn compile(restrictions: &[Restriction]) -> RelationResult<Self> {
        let mut checks = Vec::with_capacity(restrictions.len());
        for restriction in restrictions {
            let check = match &restriction.predicate {
                Predicate::Eq(value) => Check::Eq(value.clone()),
                Predicate::In(values) => Check::In(values.clone()),
                Predicate::Matches(pattern) => Check::Matches(
                    Regex::new(pattern)
                        .map_err(|e| RelationError::invalid_pattern(pattern, e.to_string()))?,
                ),
            };
            checks.push((restriction.attribute.clone(), check));
        }
        Ok(Self { checks })
    }

    /// Whether `record` satisfies every restriction.
    ///
    /// A missing attribute only satisfies `Eq(Null)`.
    pub(crate) fn accepts(&self, record: &Record) -> bool {
        self.checks.iter().all(|(attr, check)| {
            let value = record.get(attr).unwrap_or(&Value::Null);
            match check {
                Check::Eq(expected) => value == expected,
                Check::In(candidates) => candidates.contains(value),
                Check::Matches(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            }
        })
    }
}
