//! Forward conversion: FieldValue → JSON value.
//!
//! This module provides conversion from model-core's `FieldValue` and
//! `Record` to JSON values.

use base64::Engine;
use model_core::{FieldValue, Record};
use serde_json::json;

/// Wrapper for JSON values.
#[derive(Debug, Clone)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<&FieldValue> for JsonValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => JsonValue(serde_json::Value::Null),

            FieldValue::Bool(b) => JsonValue(json!(*b)),

            FieldValue::Int32(i) => JsonValue(json!(*i)),
            FieldValue::Int64(i) => JsonValue(json!(*i)),

            // Non-finite floats have no JSON form
            FieldValue::Float64(f) => JsonValue(
                serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            ),

            FieldValue::String(s) => JsonValue(json!(s)),

            // Binary - base64 encode
            FieldValue::Bytes(b) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(b);
                JsonValue(json!(encoded))
            }

            FieldValue::Uuid(u) => JsonValue(json!(u.to_string())),

            // Date/time types - ISO 8601 format
            FieldValue::Date(d) => JsonValue(json!(d.format("%Y-%m-%d").to_string())),
            FieldValue::DateTime(dt) => {
                JsonValue(json!(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
            }
            FieldValue::DateTimeUtc(dt) => JsonValue(json!(dt.to_rfc3339())),
            FieldValue::Time(t) => JsonValue(json!(t.format("%H:%M:%S").to_string())),

            // Duration - ISO 8601 seconds form (PTxS)
            FieldValue::Duration(d) => JsonValue(json!(format!("PT{}S", d.num_seconds()))),
        }
    }
}

impl From<FieldValue> for JsonValue {
    fn from(value: FieldValue) -> Self {
        JsonValue::from(&value)
    }
}

/// Convert a record's fields to a JSON object.
pub fn record_to_json(record: &Record) -> serde_json::Value {
    let obj: serde_json::Map<String, serde_json::Value> = record
        .fields()
        .iter()
        .map(|(name, value)| (name.clone(), JsonValue::from(value).into_inner()))
        .collect();
    serde_json::Value::Object(obj)
}

/// Convert a record to a JSONL line (JSON string with newline).
pub fn record_to_jsonl(record: &Record) -> Result<String, serde_json::Error> {
    let json = record_to_json(record);
    Ok(format!("{}\n", serde_json::to_string(&json)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
    use model_core::{EntitySchema, FieldDescriptor, FieldType};
    use std::collections::BTreeMap;

    #[test]
    fn test_scalar_conversions() {
        assert!(JsonValue::from(&FieldValue::Null).0.is_null());
        assert_eq!(JsonValue::from(FieldValue::Bool(true)).0, json!(true));
        assert_eq!(JsonValue::from(FieldValue::Int32(42)).0, json!(42));
        assert_eq!(JsonValue::from(FieldValue::Int64(-7)).0, json!(-7));
        assert_eq!(JsonValue::from(FieldValue::Float64(1.5)).0, json!(1.5));
        assert!(JsonValue::from(FieldValue::Float64(f64::NAN)).0.is_null());
        assert_eq!(JsonValue::from(FieldValue::from("hi")).0, json!("hi"));
    }

    #[test]
    fn test_bytes_are_base64() {
        let json_val = JsonValue::from(FieldValue::Bytes(vec![0, 1, 2, 3]));
        assert_eq!(json_val.0, json!("AAECAw=="));
    }

    #[test]
    fn test_temporal_conversions() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(JsonValue::from(FieldValue::Date(date)).0, json!("2024-01-15"));

        let dt = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(
            JsonValue::from(FieldValue::DateTime(dt)).0,
            json!("2024-01-15T10:30:00")
        );

        let utc = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            JsonValue::from(FieldValue::DateTimeUtc(utc)).0,
            json!("2024-01-15T10:30:00+00:00")
        );

        let time = NaiveTime::from_hms_opt(8, 5, 9).unwrap();
        assert_eq!(JsonValue::from(FieldValue::Time(time)).0, json!("08:05:09"));

        let duration = TimeDelta::days(1) + TimeDelta::minutes(2);
        assert_eq!(
            JsonValue::from(FieldValue::Duration(duration)).0,
            json!("PT86520S")
        );
    }

    #[test]
    fn test_record_to_jsonl() {
        let schema = EntitySchema::new(
            "users",
            vec![
                FieldDescriptor::new("id", FieldType::Int).primary_key(),
                FieldDescriptor::new("name", FieldType::Str),
            ],
        );
        let mut values = BTreeMap::new();
        values.insert("id".to_string(), FieldValue::Int64(1));
        values.insert("name".to_string(), FieldValue::from("Alice"));
        let record = Record::assemble(&schema, values).unwrap();

        let line = record_to_jsonl(&record).unwrap();
        assert_eq!(line, "{\"id\":1,\"name\":\"Alice\"}\n");
    }
}
