//! Core types for model-builder.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - [`FieldType`] - Semantic type tags declared by a schema
//! - [`FieldValue`] - Values produced for fields
//! - [`ColumnValues`] - Column set resolved during one build
//! - [`Record`] - Assembled entity instance
//! - [`SchemaProvider`] / [`SchemaCatalog`] - Entity schema inspection
//! - [`TransactionalStore`] - Staged-add and commit persistence
//!
//! # Architecture
//!
//! ```text
//! model-core (this crate)
//!    │
//!    ├─── model-generator  (random values per FieldType)
//!    ├─── json-types       (FieldValue <-> JSON)
//!    ├─── model-store      (TransactionalStore implementations)
//!    └─── model-builder    (entity builder, CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use model_core::{SchemaCatalog, SchemaProvider};
//!
//! let catalog = SchemaCatalog::from_yaml(r#"
//! entities:
//!   - name: users
//!     fields:
//!       - name: id
//!         type: int
//!         primary_key: true
//!         autoincrement: true
//!       - name: name
//!         type: text
//! "#).unwrap();
//!
//! let users = catalog.inspect("users").unwrap();
//! assert_eq!(users.field_names(), vec!["id", "name"]);
//! ```

pub mod schema;
pub mod store;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{
    EntityDefinition, EntitySchema, FieldDescriptor, ForeignKeyRef, RelationshipDescriptor,
    SchemaCatalog, SchemaError, SchemaProvider,
};
pub use store::{Transaction, TransactionalStore};
pub use types::FieldType;
pub use values::{AssemblyError, ColumnValue, ColumnValues, FieldValue, PrimaryKey, Record};
