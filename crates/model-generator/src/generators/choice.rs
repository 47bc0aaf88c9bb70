//! Uniform choice generators.

use crate::error::ProviderError;
use model_core::FieldValue;
use rand::Rng;

/// Choose one element of a non-empty list uniformly.
pub fn generate_from_list<'a, T, R: Rng>(
    rng: &mut R,
    items: &'a [T],
) -> Result<&'a T, ProviderError> {
    if items.is_empty() {
        return Err(ProviderError::empty_choices("list"));
    }
    Ok(&items[rng.random_range(0..items.len())])
}

/// Choose the underlying value of one enum member uniformly.
pub fn generate_enum<'a, R: Rng>(
    rng: &mut R,
    members: &'a [FieldValue],
) -> Result<&'a FieldValue, ProviderError> {
    if members.is_empty() {
        return Err(ProviderError::empty_choices("enum"));
    }
    Ok(&members[rng.random_range(0..members.len())])
}
