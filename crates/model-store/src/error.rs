//! Error types for the record stores.

use json_types::JsonConversionError;
use model_core::{AssemblyError, SchemaError};
use thiserror::Error;

/// Errors that can occur while staging or committing records.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with the same primary key already exists.
    #[error("Duplicate primary key {key} for entity '{entity}'")]
    DuplicateKey { entity: String, key: String },

    /// A foreign key does not match any stored row of the target entity.
    #[error("Foreign key '{entity}.{field}' = {key} has no matching row in '{target}'")]
    ForeignKeyViolation {
        entity: String,
        field: String,
        target: String,
        key: String,
    },

    /// The entity's auto-increment counter has no key left to hand out.
    #[error("Auto-increment sequence exhausted for entity '{entity}'")]
    SequenceExhausted { entity: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored JSON does not match the entity schema.
    #[error("Conversion error: {0}")]
    Conversion(#[from] JsonConversionError),

    /// Schema lookup failed while checking constraints.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A generated identity could not be written back.
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),
}
