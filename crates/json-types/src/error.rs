//! Error types for JSON conversion.

use model_core::AssemblyError;
use thiserror::Error;

/// Errors that can occur while reading values back from JSON.
#[derive(Debug, Error)]
pub enum JsonConversionError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Expected a JSON object, found {0}")]
    NotAnObject(String),

    #[error("Unknown field '{field}' for entity '{entity}'")]
    UnknownField { entity: String, field: String },

    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
