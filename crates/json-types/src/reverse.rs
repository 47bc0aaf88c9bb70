//! Reverse conversion: JSON value → FieldValue.
//!
//! This module provides type-aware conversion from JSON values to
//! model-core's `FieldValue`, and rebuilds records read back from JSON.

use crate::error::JsonConversionError;
use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use model_core::{EntitySchema, FieldType, FieldValue, Record};
use std::collections::BTreeMap;

/// Parse an ISO 8601 duration string in seconds form (`PTxS`).
fn parse_iso8601_duration(s: &str) -> Option<TimeDelta> {
    let secs_str = s.trim().strip_prefix("PT")?.strip_suffix('S')?;
    let secs: i64 = secs_str.parse().ok()?;
    TimeDelta::try_seconds(secs)
}

/// Parse a naive datetime in ISO 8601 or SQL form.
fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parse a UTC datetime; naive strings are taken as UTC.
fn parse_utc_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_naive_datetime(s).map(|naive| naive.and_utc())
}

/// JSON value paired with the declared field type for conversion.
#[derive(Debug, Clone)]
pub struct JsonValueWithSchema<'a> {
    /// The JSON value.
    pub value: &'a serde_json::Value,
    /// The declared field type.
    pub field_type: &'a FieldType,
}

impl<'a> JsonValueWithSchema<'a> {
    /// Create a new JsonValueWithSchema.
    pub fn new(value: &'a serde_json::Value, field_type: &'a FieldType) -> Self {
        Self { value, field_type }
    }

    /// Convert to a FieldValue.
    pub fn to_field_value(&self) -> Result<FieldValue, JsonConversionError> {
        use serde_json::Value as Json;

        let mismatch = || JsonConversionError::TypeMismatch {
            expected: self.field_type.to_string(),
            found: self.value.to_string(),
        };

        let value = match (self.field_type, self.value) {
            (_, Json::Null) => FieldValue::Null,

            (FieldType::Bool, Json::Bool(b)) => FieldValue::Bool(*b),
            (FieldType::Bool, Json::Number(n)) => FieldValue::Bool(n.as_i64().ok_or_else(mismatch)? != 0),

            (FieldType::Int, Json::Number(n)) => {
                let i = n.as_i64().ok_or_else(mismatch)?;
                FieldValue::Int32(i32::try_from(i).map_err(|_| mismatch())?)
            }
            // Store-assigned keys are written as 64-bit integers.
            (FieldType::Int64, Json::Number(n)) => FieldValue::Int64(n.as_i64().ok_or_else(mismatch)?),

            (FieldType::Float, Json::Number(n)) => FieldValue::Float64(n.as_f64().ok_or_else(mismatch)?),

            (FieldType::Str | FieldType::Unknown(_), Json::String(s)) => FieldValue::String(s.clone()),

            (FieldType::Enum { values }, json) => values
                .iter()
                .find(|member| enum_member_matches(member, json))
                .cloned()
                .ok_or_else(mismatch)?,

            // Binary types - base64 encoded in JSON
            (FieldType::Bytes, Json::String(s)) => FieldValue::Bytes(
                base64::engine::general_purpose::STANDARD
                    .decode(s)
                    .map_err(|_| mismatch())?,
            ),

            (FieldType::Uuid, Json::String(s)) => {
                FieldValue::Uuid(uuid::Uuid::parse_str(s).map_err(|_| mismatch())?)
            }

            (FieldType::Date, Json::String(s)) => FieldValue::Date(
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| mismatch())?,
            ),
            (FieldType::DateTime, Json::String(s)) => {
                FieldValue::DateTime(parse_naive_datetime(s).ok_or_else(mismatch)?)
            }
            (FieldType::DateTimeUtc, Json::String(s)) => {
                FieldValue::DateTimeUtc(parse_utc_datetime(s).ok_or_else(mismatch)?)
            }
            (FieldType::Time, Json::String(s)) => FieldValue::Time(
                NaiveTime::parse_from_str(s, "%H:%M:%S").map_err(|_| mismatch())?,
            ),
            (FieldType::Duration, Json::String(s)) => {
                FieldValue::Duration(parse_iso8601_duration(s).ok_or_else(mismatch)?)
            }

            _ => return Err(mismatch()),
        };

        Ok(value)
    }
}

fn enum_member_matches(member: &FieldValue, json: &serde_json::Value) -> bool {
    use serde_json::Value as Json;

    match (member, json) {
        (FieldValue::String(m), Json::String(s)) => m == s,
        (FieldValue::Bool(m), Json::Bool(b)) => m == b,
        (FieldValue::Int32(m), Json::Number(n)) => n.as_i64() == Some(i64::from(*m)),
        (FieldValue::Int64(m), Json::Number(n)) => n.as_i64() == Some(*m),
        (FieldValue::Float64(m), Json::Number(n)) => n.as_f64() == Some(*m),
        _ => false,
    }
}

/// Rebuild a record of the given entity from a JSON object.
pub fn record_from_json(
    schema: &EntitySchema,
    json: &serde_json::Value,
) -> Result<Record, JsonConversionError> {
    let serde_json::Value::Object(obj) = json else {
        return Err(JsonConversionError::NotAnObject(json.to_string()));
    };

    let mut values = BTreeMap::new();
    for (name, raw) in obj {
        let field = schema
            .field(name)
            .ok_or_else(|| JsonConversionError::UnknownField {
                entity: schema.name.clone(),
                field: name.clone(),
            })?;
        // Auto-increment keys are assigned as Int64 regardless of the declared width.
        let value = match (&field.field_type, raw) {
            (FieldType::Int, serde_json::Value::Number(n)) if field.autoincrement => {
                FieldValue::Int64(n.as_i64().ok_or_else(|| JsonConversionError::TypeMismatch {
                    expected: field.field_type.to_string(),
                    found: raw.to_string(),
                })?)
            }
            _ => JsonValueWithSchema::new(raw, &field.field_type).to_field_value()?,
        };
        values.insert(name.clone(), value);
    }

    Ok(Record::assemble(schema, values)?)
}

/// Parse a command-line override for a field.
///
/// The raw text is read as JSON first; text fields and enums also accept
/// bare words.
pub fn parse_override(field_type: &FieldType, raw: &str) -> Result<FieldValue, JsonConversionError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => match JsonValueWithSchema::new(&json, field_type).to_field_value() {
            Ok(value) => Ok(value),
            Err(err) => bare_string(field_type, raw).ok_or(err),
        },
        Err(_) => {
            let json = serde_json::Value::String(raw.to_string());
            JsonValueWithSchema::new(&json, field_type).to_field_value()
        }
    }
}

fn bare_string(field_type: &FieldType, raw: &str) -> Option<FieldValue> {
    match field_type {
        FieldType::Str | FieldType::Unknown(_) => Some(FieldValue::String(raw.to_string())),
        FieldType::Enum { .. } => {
            let json = serde_json::Value::String(raw.to_string());
            JsonValueWithSchema::new(&json, field_type).to_field_value().ok()
        }
        _ => None,
    }
}
