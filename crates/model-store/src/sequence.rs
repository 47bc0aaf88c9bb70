//! Auto-increment sequences shared by the stores.

use crate::error::StoreError;
use model_core::{FieldValue, Record};
use std::collections::BTreeMap;
use tracing::trace;

/// Per-entity auto-increment counters.
///
/// Each entity's counter holds the last assigned (or observed) key. Keys
/// start at 1.
#[derive(Debug, Clone, Default)]
pub struct Sequences {
    last: BTreeMap<String, i64>,
}

impl Sequences {
    /// Create empty sequences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a counter exists for the entity.
    pub fn contains(&self, entity: &str) -> bool {
        self.last.contains_key(entity)
    }

    /// Last key assigned or observed for the entity.
    pub fn last(&self, entity: &str) -> Option<i64> {
        self.last.get(entity).copied()
    }

    /// Move the entity's counter forward to at least `key`.
    pub fn observe(&mut self, entity: &str, key: i64) {
        let last = self.last.entry(entity.to_string()).or_insert(0);
        *last = (*last).max(key);
    }

    /// Assign the next key to an auto-increment record whose key is unset.
    ///
    /// Keys set explicitly are kept and advance the counter instead.
    pub fn assign(&mut self, record: &mut Record) -> Result<(), StoreError> {
        let Some(pk) = record.primary_key().filter(|pk| pk.autoincrement).cloned() else {
            return Ok(());
        };

        if let Some(key) = record.key().as_i64() {
            self.observe(record.entity(), key);
            return Ok(());
        }
        if !record.key().is_null() {
            return Ok(());
        }

        let last = self.last.entry(record.entity().to_string()).or_insert(0);
        let key = last
            .checked_add(1)
            .ok_or_else(|| StoreError::SequenceExhausted {
                entity: record.entity().to_string(),
            })?;
        *last = key;
        record.set(&pk.name, FieldValue::Int64(key))?;
        trace!(entity = record.entity(), key, "Assigned generated key");
        Ok(())
    }
}

/// Compare two key values, treating integer widths as equal.
pub fn keys_match(a: &FieldValue, b: &FieldValue) -> bool {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_core::{EntitySchema, FieldDescriptor, FieldType};

    fn user(id: FieldValue) -> Record {
        let schema = EntitySchema::new(
            "users",
            vec![
                FieldDescriptor::new("id", FieldType::Int)
                    .primary_key()
                    .autoincrement(),
                FieldDescriptor::new("name", FieldType::Str),
            ],
        );
        let values = [("id".to_string(), id)].into_iter().collect();
        Record::assemble(&schema, values).unwrap()
    }

    #[test]
    fn test_assign_starts_at_one() {
        let mut sequences = Sequences::new();

        let mut first = user(FieldValue::Null);
        let mut second = user(FieldValue::Null);
        sequences.assign(&mut first).unwrap();
        sequences.assign(&mut second).unwrap();

        assert_eq!(first.key(), &FieldValue::Int64(1));
        assert_eq!(second.key(), &FieldValue::Int64(2));
        assert_eq!(sequences.last("users"), Some(2));
    }

    #[test]
    fn test_explicit_key_advances_counter() {
        let mut sequences = Sequences::new();

        let mut explicit = user(FieldValue::Int32(10));
        sequences.assign(&mut explicit).unwrap();
        assert_eq!(explicit.key(), &FieldValue::Int32(10));

        let mut next = user(FieldValue::Null);
        sequences.assign(&mut next).unwrap();
        assert_eq!(next.key(), &FieldValue::Int64(11));
    }

    #[test]
    fn test_exhausted_sequence() {
        let mut sequences = Sequences::new();
        sequences.observe("users", i64::MAX);

        let mut record = user(FieldValue::Null);
        let err = sequences.assign(&mut record).unwrap_err();

        assert!(matches!(err, StoreError::SequenceExhausted { ref entity } if entity == "users"));
        assert_eq!(record.key(), &FieldValue::Null);
        assert_eq!(sequences.last("users"), Some(i64::MAX));
    }

    #[test]
    fn test_keys_match_across_widths() {
        assert!(keys_match(&FieldValue::Int32(3), &FieldValue::Int64(3)));
        assert!(!keys_match(&FieldValue::Int32(3), &FieldValue::Int64(4)));
        assert!(keys_match(&FieldValue::from("a"), &FieldValue::from("a")));
    }
}
