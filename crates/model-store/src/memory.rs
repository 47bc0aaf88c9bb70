//! In-process transactional store.

use crate::error::StoreError;
use crate::sequence::{keys_match, Sequences};
use json_types::JsonValue;
use model_core::{FieldValue, Record, SchemaCatalog, SchemaProvider, TransactionalStore};
use std::collections::BTreeMap;
use tracing::debug;

/// In-memory store with per-entity tables.
///
/// Commits are all-or-nothing: every staged record is checked (unique
/// primary keys and, when constraints are enabled, foreign keys) before any
/// of them becomes visible.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, Vec<Record>>,
    sequences: Sequences,
    staged: Vec<Record>,
    constraints: Option<SchemaCatalog>,
}

impl MemoryStore {
    /// Create an empty store without foreign-key enforcement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce foreign keys declared by the given catalog on commit.
    pub fn with_constraints(mut self, catalog: SchemaCatalog) -> Self {
        self.constraints = Some(catalog);
        self
    }

    /// Look up a committed record by primary key.
    pub fn get(&self, entity: &str, key: &FieldValue) -> Option<&Record> {
        self.rows(entity)
            .iter()
            .find(|record| keys_match(record.key(), key))
    }

    /// All committed records of an entity, in commit order.
    pub fn rows(&self, entity: &str) -> &[Record] {
        self.tables.get(entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of committed records of an entity.
    pub fn count(&self, entity: &str) -> usize {
        self.rows(entity).len()
    }

    /// Number of records waiting for commit.
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    fn check_unique(&self, record: &Record, batch: &[Record]) -> Result<(), StoreError> {
        let key = record.key();
        if key.is_null() {
            return Ok(());
        }
        let clash = self
            .rows(record.entity())
            .iter()
            .chain(batch.iter().filter(|r| r.entity() == record.entity()))
            .any(|existing| keys_match(existing.key(), key));
        if clash {
            return Err(StoreError::DuplicateKey {
                entity: record.entity().to_string(),
                key: display_key(key),
            });
        }
        Ok(())
    }

    fn check_references(
        &self,
        catalog: &SchemaCatalog,
        record: &Record,
        batch: &[Record],
    ) -> Result<(), StoreError> {
        let schema = catalog.inspect(record.entity())?;
        for relationship in &schema.relationships {
            let value = record
                .get(&relationship.foreign_key)
                .unwrap_or(&FieldValue::Null);
            if value.is_null() {
                continue;
            }

            let target = &relationship.target_entity;
            let found = self
                .rows(target)
                .iter()
                .chain(batch.iter().filter(|r| r.entity() == target))
                .any(|row| {
                    row.get(&relationship.target_key)
                        .is_some_and(|key| keys_match(key, value))
                });
            if !found {
                return Err(StoreError::ForeignKeyViolation {
                    entity: record.entity().to_string(),
                    field: relationship.foreign_key.clone(),
                    target: target.clone(),
                    key: display_key(value),
                });
            }
        }
        Ok(())
    }

    fn prepare(&self, staged: Vec<Record>) -> Result<(Vec<Record>, Sequences), StoreError> {
        let mut sequences = self.sequences.clone();
        let mut batch: Vec<Record> = Vec::with_capacity(staged.len());

        for mut record in staged {
            sequences.assign(&mut record)?;
            self.check_unique(&record, &batch)?;
            if let Some(catalog) = &self.constraints {
                self.check_references(catalog, &record, &batch)?;
            }
            batch.push(record);
        }

        Ok((batch, sequences))
    }
}

impl TransactionalStore for MemoryStore {
    type Error = StoreError;

    fn add(&mut self, record: Record) -> Result<(), StoreError> {
        self.staged.push(record);
        Ok(())
    }

    fn commit(&mut self) -> Result<Vec<Record>, StoreError> {
        let staged = std::mem::take(&mut self.staged);
        let (batch, sequences) = self.prepare(staged)?;

        self.sequences = sequences;
        for record in &batch {
            self.tables
                .entry(record.entity().to_string())
                .or_default()
                .push(record.clone());
        }

        debug!("Committed {} records to memory store", batch.len());
        Ok(batch)
    }

    fn rollback(&mut self) {
        if !self.staged.is_empty() {
            debug!("Rolling back {} staged records", self.staged.len());
        }
        self.staged.clear();
    }
}

pub(crate) fn display_key(key: &FieldValue) -> String {
    JsonValue::from(key).into_inner().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_core::{EntitySchema, FieldDescriptor, FieldType};

    const CATALOG: &str = r#"
entities:
  - name: users
    fields:
      - name: id
        type: int
        primary_key: true
        autoincrement: true
      - name: name
        type: text
  - name: addresses
    fields:
      - name: id
        type: int
        primary_key: true
        autoincrement: true
      - name: user_id
        type: int
        references: users.id
"#;

    fn catalog() -> SchemaCatalog {
        SchemaCatalog::from_yaml(CATALOG).unwrap()
    }

    fn record(entity: &str, values: &[(&str, FieldValue)]) -> Record {
        let schema = catalog().inspect(entity).unwrap();
        let values = values
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        Record::assemble(&schema, values).unwrap()
    }

    #[test]
    fn test_commit_assigns_keys() {
        let mut store = MemoryStore::new();

        store.add(record("users", &[("name", "Alice".into())])).unwrap();
        store.add(record("users", &[("name", "Bob".into())])).unwrap();
        let flushed = store.commit().unwrap();

        assert_eq!(flushed.len(), 2);
        assert_eq!(flushed[0].key(), &FieldValue::Int64(1));
        assert_eq!(flushed[1].key(), &FieldValue::Int64(2));
        assert_eq!(store.count("users"), 2);

        let bob = store.get("users", &FieldValue::Int32(2)).unwrap();
        assert_eq!(bob.get("name"), Some(&FieldValue::from("Bob")));
    }

    #[test]
    fn test_duplicate_key_rejects_whole_commit() {
        let schema = EntitySchema::new(
            "tags",
            vec![FieldDescriptor::new("label", FieldType::Str).primary_key()],
        );
        let tag = |label: &str| {
            Record::assemble(
                &schema,
                [("label".to_string(), FieldValue::from(label))]
                    .into_iter()
                    .collect(),
            )
            .unwrap()
        };

        let mut store = MemoryStore::new();
        store.add(tag("rust")).unwrap();
        store.commit().unwrap();

        store.add(tag("go")).unwrap();
        store.add(tag("rust")).unwrap();
        let err = store.commit().unwrap_err();

        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(store.count("tags"), 1);
        assert_eq!(store.staged_count(), 0);
    }

    #[test]
    fn test_foreign_key_enforcement() {
        let mut store = MemoryStore::new().with_constraints(catalog());

        store
            .add(record("addresses", &[("user_id", FieldValue::Int64(9))]))
            .unwrap();
        let err = store.commit().unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation { ref target, .. } if target == "users"));

        store.add(record("users", &[("name", "Alice".into())])).unwrap();
        let user = store.commit().unwrap().remove(0);

        store
            .add(record("addresses", &[("user_id", user.key().clone())]))
            .unwrap();
        assert!(store.commit().is_ok());
        assert_eq!(store.count("addresses"), 1);
    }

    #[test]
    fn test_failed_commit_does_not_consume_sequence() {
        let mut store = MemoryStore::new().with_constraints(catalog());

        store.add(record("users", &[("name", "Alice".into())])).unwrap();
        store
            .add(record("addresses", &[("user_id", FieldValue::Int64(42))]))
            .unwrap();
        assert!(store.commit().is_err());
        assert_eq!(store.count("users"), 0);

        store.add(record("users", &[("name", "Bob".into())])).unwrap();
        let flushed = store.commit().unwrap();
        assert_eq!(flushed[0].key(), &FieldValue::Int64(1));
    }

    #[test]
    fn test_rollback_discards_staged() {
        let mut store = MemoryStore::new();

        {
            let mut tx = store.transaction();
            tx.add(record("users", &[("name", "Alice".into())])).unwrap();
        }

        assert_eq!(store.staged_count(), 0);
        assert_eq!(store.count("users"), 0);
    }
}
