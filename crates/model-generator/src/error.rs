//! Error types for the random value provider.

use std::fmt::Display;
use thiserror::Error;

/// Errors raised by generator preconditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// A generator was called with arguments it cannot satisfy.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProviderError {
    pub(crate) fn invalid_range<T: Display>(min: T, max: T) -> Self {
        Self::InvalidArgument(format!("minimum {min} is greater than maximum {max}"))
    }

    pub(crate) fn empty_choices(what: &str) -> Self {
        Self::InvalidArgument(format!("cannot choose from an empty {what}"))
    }
}
