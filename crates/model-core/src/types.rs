//! Semantic field types for model-builder.
//!
//! This module defines `FieldType`, the closed set of semantic type tags a
//! schema can declare for a field. Every tag maps to exactly one random value
//! generator; names the catalog does not recognize are kept as
//! [`FieldType::Unknown`] rather than rejected.

use crate::values::FieldValue;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Semantic type declared for a mapped field.
///
/// # YAML Format
///
/// Simple types can be specified as strings, including the usual column
/// aliases:
/// ```yaml
/// type: int
/// type: big_int
/// type: text
/// type: interval
/// ```
///
/// Enumerations use the object format. Members may be strings, numbers or
/// booleans:
/// ```yaml
/// type:
///   type: enum
///   values: [active, inactive]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Boolean value
    Bool,

    /// 32-bit signed integer (also small integers)
    Int,

    /// 64-bit signed integer
    Int64,

    /// Floating point, including non-decimal numerics
    Float,

    /// UTF-8 text of any length
    Str,

    /// Binary data
    Bytes,

    /// Calendar date (YYYY-MM-DD)
    Date,

    /// Timestamp without timezone
    DateTime,

    /// Timestamp normalized to UTC
    DateTimeUtc,

    /// Time of day (HH:MM:SS)
    Time,

    /// Time interval
    Duration,

    /// UUID (128-bit)
    Uuid,

    /// Enumerated type, holding the underlying value of every member
    Enum {
        /// Member values
        values: Vec<FieldValue>,
    },

    /// A declared type with no dedicated generator, kept by name
    Unknown(String),
}

impl FieldType {
    /// Canonical name used when serializing.
    pub fn name(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int64 => "big_int",
            Self::Float => "float",
            Self::Str => "text",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::DateTimeUtc => "timestamp_tz",
            Self::Time => "time",
            Self::Duration => "duration",
            Self::Uuid => "uuid",
            Self::Enum { .. } => "enum",
            Self::Unknown(name) => name,
        }
    }

    /// Resolve a simple type name, falling back to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Self::Bool,
            "int" | "integer" | "small_int" | "smallint" | "tiny_int" | "tinyint" | "int32" => {
                Self::Int
            }
            "big_int" | "bigint" | "int64" | "long" => Self::Int64,
            "float" | "double" | "real" | "numeric" | "decimal" | "float64" => Self::Float,
            "str" | "string" | "text" | "char" | "var_char" | "varchar" | "unicode"
            | "unicode_text" => Self::Str,
            "bytes" | "blob" | "binary" | "large_binary" | "bytea" => Self::Bytes,
            "date" => Self::Date,
            "date_time" | "datetime" | "timestamp" => Self::DateTime,
            "timestamp_tz" | "timestamptz" | "date_time_utc" => Self::DateTimeUtc,
            "time" => Self::Time,
            "duration" | "interval" | "timedelta" => Self::Duration,
            "uuid" => Self::Uuid,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum { values } => {
                let members: Vec<String> = values.iter().map(member_text).collect();
                write!(f, "enum({})", members.join(", "))
            }
            other => f.write_str(other.name()),
        }
    }
}

// Simple types serialize as a string, enums as {"type": "enum", "values": [...]}.

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Enum { values } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "enum")?;
                let members: Vec<serde_yaml::Value> = values.iter().map(member_yaml).collect();
                map.serialize_entry("values", &members)?;
                map.end()
            }
            other => serializer.serialize_str(other.name()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct FieldTypeVisitor;

        impl<'de> Visitor<'de> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing a FieldType")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                if value.eq_ignore_ascii_case("enum") {
                    return Err(E::custom("enum types need a `values` list"));
                }
                Ok(FieldType::from_name(value))
            }

            // Map format: {"type": "enum", "values": [...]} or {"type": "var_char", "length": 255}
            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                if type_name.eq_ignore_ascii_case("enum") {
                    let raw = fields
                        .remove("values")
                        .ok_or_else(|| M::Error::missing_field("values"))?;
                    let values = enum_values(raw).map_err(M::Error::custom)?;
                    return Ok(FieldType::Enum { values });
                }

                // Length, precision and friends do not change the generator.
                Ok(FieldType::from_name(&type_name))
            }
        }

        deserializer.deserialize_any(FieldTypeVisitor)
    }
}

/// Enum members keep their declared scalar type: integers become `Int64`,
/// other numbers `Float64`.
fn enum_values(raw: serde_yaml::Value) -> Result<Vec<FieldValue>, String> {
    let serde_yaml::Value::Sequence(items) = raw else {
        return Err("enum `values` must be a list".to_string());
    };

    items
        .into_iter()
        .map(|item| match item {
            serde_yaml::Value::String(s) => Ok(FieldValue::String(s)),
            serde_yaml::Value::Bool(b) => Ok(FieldValue::Bool(b)),
            serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(FieldValue::Int64(i)),
                (None, Some(f)) => Ok(FieldValue::Float64(f)),
                (None, None) => Err(format!("unsupported enum member: {n}")),
            },
            other => Err(format!("unsupported enum member: {other:?}")),
        })
        .collect()
}

fn member_yaml(member: &FieldValue) -> serde_yaml::Value {
    match member {
        FieldValue::Bool(b) => serde_yaml::Value::Bool(*b),
        FieldValue::Int32(i) => serde_yaml::Value::Number((*i as i64).into()),
        FieldValue::Int64(i) => serde_yaml::Value::Number((*i).into()),
        FieldValue::Float64(f) => serde_yaml::Value::Number((*f).into()),
        other => serde_yaml::Value::String(member_text(other)),
    }
}

fn member_text(member: &FieldValue) -> String {
    match member {
        FieldValue::String(s) => s.clone(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Int32(i) => i.to_string(),
        FieldValue::Int64(i) => i.to_string(),
        FieldValue::Float64(f) => f.to_string(),
        other => format!("{other:?}"),
    }
}
