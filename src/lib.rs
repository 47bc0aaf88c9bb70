//! Randomized test instances for mapped entities.
//!
//! `model-builder` creates instances of entities described by a
//! [`SchemaProvider`](model_core::SchemaProvider), filling every field with
//! a random value of its declared type and building the entities its
//! foreign keys point to. Instances can be kept in memory or committed to a
//! [`TransactionalStore`](model_core::TransactionalStore).
//!
//! # Crates
//!
//! - `model-core` - Field types, values, records, schema and store traits
//! - `model-generator` - Random value provider
//! - `json-types` - JSON conversions
//! - `model-store` - Memory and JSONL stores
//! - `model-builder` (this crate) - Entity builder and CLI
//!
//! # Example
//!
//! ```rust
//! use model_builder::{ModelBuilder, Overrides};
//! use model_core::{FieldValue, SchemaCatalog};
//! use model_store::MemoryStore;
//!
//! let catalog = SchemaCatalog::from_yaml(r#"
//! entities:
//!   - name: users
//!     fields:
//!       - { name: id, type: int, primary_key: true, autoincrement: true }
//!       - { name: name, type: text }
//!   - name: addresses
//!     fields:
//!       - { name: id, type: int, primary_key: true, autoincrement: true }
//!       - { name: email_address, type: text }
//!       - { name: user_id, type: int, references: users.id }
//! "#).unwrap();
//!
//! let mut store = MemoryStore::new();
//! let mut builder = ModelBuilder::new(&catalog).with_seed(42);
//!
//! let address = builder
//!     .save(&mut store, "addresses", Overrides::new().set("email_address", "a@example.com"))
//!     .unwrap();
//!
//! let user_id = address.get("user_id").unwrap();
//! assert_eq!(store.get("users", user_id).unwrap().key(), user_id);
//! ```

pub mod builder;
pub mod error;
pub mod options;
pub mod overrides;

pub use builder::ModelBuilder;
pub use error::{BuildError, ConfigError};
pub use options::{BuildOptions, DEFAULT_MAX_DEPTH};
pub use overrides::Overrides;
