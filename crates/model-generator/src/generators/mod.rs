//! Individual value generators for each semantic type.
//!
//! Every generator is a free function over any [`rand::Rng`], so callers can
//! inject a seeded source. [`generate_value`] is the type dispatch table used
//! by the entity builder.

pub mod choice;
pub mod numeric;
pub mod temporal;
pub mod text;
pub mod uuid;

use crate::error::ProviderError;
use model_core::{FieldType, FieldValue};
use rand::Rng;

/// Generate a value for the declared field type.
///
/// Every tag has exactly one generator. Types without a dedicated generator
/// get a random string.
pub fn generate_value<R: Rng>(
    field_type: &FieldType,
    rng: &mut R,
) -> Result<FieldValue, ProviderError> {
    let value = match field_type {
        FieldType::Bool => FieldValue::Bool(rng.random_bool(0.5)),

        FieldType::Int => {
            FieldValue::Int32(numeric::generate_int_range(rng, 0, numeric::DEFAULT_INT_MAX)?)
        }

        FieldType::Int64 => FieldValue::Int64(numeric::generate_int64_range(
            rng,
            0,
            numeric::DEFAULT_INT64_MAX,
        )?),

        FieldType::Float => FieldValue::Float64(numeric::generate_float_range(
            rng,
            0.0,
            numeric::DEFAULT_FLOAT_MAX,
            numeric::DEFAULT_FLOAT_PRECISION,
        )?),

        FieldType::Str => FieldValue::String(text::generate_string(rng, text::DEFAULT_STR_LENGTH)),

        FieldType::Bytes => FieldValue::Bytes(text::generate_bytes(rng, text::DEFAULT_BYTES_LENGTH)),

        FieldType::Date => FieldValue::Date(temporal::generate_date(rng)),

        FieldType::DateTime => FieldValue::DateTime(temporal::generate_datetime(rng)),

        FieldType::DateTimeUtc => FieldValue::DateTimeUtc(temporal::generate_datetime_utc(rng)),

        FieldType::Time => FieldValue::Time(temporal::generate_time(rng)),

        FieldType::Duration => FieldValue::Duration(temporal::generate_duration(rng)),

        FieldType::Uuid => FieldValue::Uuid(uuid::generate_uuid_v4(rng)),

        FieldType::Enum { values } => choice::generate_enum(rng, values)?.clone(),

        FieldType::Unknown(_) => {
            FieldValue::String(text::generate_string(rng, text::DEFAULT_STR_LENGTH))
        }
    };

    Ok(value)
}
