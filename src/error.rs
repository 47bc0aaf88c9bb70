//! Error types for building and saving entity instances.

use model_core::{AssemblyError, SchemaError};
use model_generator::ProviderError;
use thiserror::Error;

/// Errors that can occur while building or saving an instance.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The schema provider does not know the entity.
    #[error("'{0}' is not a mapped entity")]
    NotAMappedEntity(String),

    /// The merged field set (generated values plus overrides) was rejected.
    #[error("Invalid field set for '{entity}': {source}")]
    InvalidFieldSet {
        entity: String,
        #[source]
        source: AssemblyError,
    },

    /// A random value precondition was violated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ProviderError),

    /// The schema could not be read or is inconsistent.
    #[error("Schema error: {0}")]
    Schema(SchemaError),

    /// Relationship resolution went deeper than the configured bound.
    #[error("Relationship depth limit of {limit} exceeded while building '{entity}'")]
    RelationshipDepthExceeded { entity: String, limit: usize },

    /// The store committed without returning the staged record.
    #[error("Commit of '{0}' returned no records")]
    EmptyCommit(String),

    /// The store failed; its error is kept as the source.
    #[error(transparent)]
    Store(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl BuildError {
    /// Wrap a store error.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }

    /// The store error, if this is one of type `E`.
    pub fn store_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Store(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl From<SchemaError> for BuildError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::NotInspectable(entity) => Self::NotAMappedEntity(entity),
            other => Self::Schema(other),
        }
    }
}

/// Errors that can occur while loading builder options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
