//! Transactional store capability.
//!
//! A store stages records with `add` and flushes them with `commit`,
//! assigning generated identities (auto-increment keys) on the way. The
//! builder only ever talks to a store through a [`Transaction`].

use crate::values::Record;

/// A store with staged-add and commit semantics.
pub trait TransactionalStore {
    /// Error reported by the store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stage a record for persistence.
    fn add(&mut self, record: Record) -> Result<(), Self::Error>;

    /// Flush all staged records.
    ///
    /// Returns the flushed records in staging order, with generated
    /// identities written back. A failed commit leaves nothing staged.
    fn commit(&mut self) -> Result<Vec<Record>, Self::Error>;

    /// Drop all staged records.
    fn rollback(&mut self);

    /// Begin a scoped transaction.
    fn transaction(&mut self) -> Transaction<'_, Self>
    where
        Self: Sized,
    {
        Transaction::new(self)
    }
}

/// Scoped transaction over a store.
///
/// Staged records that were not committed are rolled back when the
/// transaction is dropped.
pub struct Transaction<'a, S: TransactionalStore> {
    store: &'a mut S,
    finished: bool,
}

impl<'a, S: TransactionalStore> Transaction<'a, S> {
    /// Begin a transaction on the given store.
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            finished: false,
        }
    }

    /// Stage a record.
    pub fn add(&mut self, record: Record) -> Result<(), S::Error> {
        self.store.add(record)
    }

    /// Commit staged records and end the transaction.
    pub fn commit(mut self) -> Result<Vec<Record>, S::Error> {
        self.finished = true;
        self.store.commit()
    }
}

impl<S: TransactionalStore> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        if !self.finished {
            self.store.rollback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EntitySchema, FieldDescriptor};
    use crate::types::FieldType;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct CountingStore {
        staged: Vec<Record>,
        committed: Vec<Record>,
        rollbacks: usize,
    }

    impl TransactionalStore for CountingStore {
        type Error = std::io::Error;

        fn add(&mut self, record: Record) -> Result<(), Self::Error> {
            self.staged.push(record);
            Ok(())
        }

        fn commit(&mut self) -> Result<Vec<Record>, Self::Error> {
            let flushed = std::mem::take(&mut self.staged);
            self.committed.extend(flushed.iter().cloned());
            Ok(flushed)
        }

        fn rollback(&mut self) {
            self.staged.clear();
            self.rollbacks += 1;
        }
    }

    fn tag() -> Record {
        let schema = EntitySchema::new("tags", vec![FieldDescriptor::new("label", FieldType::Str)]);
        Record::assemble(&schema, BTreeMap::new()).unwrap()
    }

    #[test]
    fn test_commit_flushes_staged() {
        let mut store = CountingStore::default();

        let mut tx = store.transaction();
        tx.add(tag()).unwrap();
        let flushed = tx.commit().unwrap();

        assert_eq!(flushed.len(), 1);
        assert_eq!(store.committed.len(), 1);
        assert_eq!(store.rollbacks, 0);
    }

    #[test]
    fn test_drop_without_commit_rolls_back() {
        let mut store = CountingStore::default();

        {
            let mut tx = store.transaction();
            tx.add(tag()).unwrap();
        }

        assert!(store.staged.is_empty());
        assert!(store.committed.is_empty());
        assert_eq!(store.rollbacks, 1);
    }
}
