//! Transactional stores for model-builder records.
//!
//! Both stores implement [`model_core::TransactionalStore`]: records are
//! staged with `add` and flushed with `commit`, which assigns auto-increment
//! keys and returns the flushed records.
//!
//! - [`MemoryStore`] - In-process tables with unique keys and optional
//!   foreign-key enforcement
//! - [`JsonlStore`] - One append-only JSON Lines file per entity
//!
//! # Example
//!
//! ```rust
//! use model_core::{EntitySchema, FieldDescriptor, FieldType, Record, TransactionalStore};
//! use model_store::MemoryStore;
//!
//! let schema = EntitySchema::new(
//!     "users",
//!     vec![FieldDescriptor::new("id", FieldType::Int).primary_key().autoincrement()],
//! );
//! let record = Record::assemble(&schema, Default::default()).unwrap();
//!
//! let mut store = MemoryStore::new();
//! let mut tx = store.transaction();
//! tx.add(record).unwrap();
//! let committed = tx.commit().unwrap();
//!
//! assert_eq!(committed[0].key().as_i64(), Some(1));
//! ```

pub mod error;
pub mod jsonl;
pub mod memory;
pub mod sequence;

pub use error::StoreError;
pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use sequence::Sequences;
