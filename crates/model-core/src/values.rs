//! Value representations for model-builder.
//!
//! This module defines the values produced by the random value provider,
//! the transient column set collected during one build, and the assembled
//! [`Record`] handed back to callers.

use crate::schema::EntitySchema;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Error raised when a merged field set cannot be assembled into a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    /// A value names a field the entity does not declare
    #[error("Entity '{entity}' has no field '{field}'")]
    UnknownField { entity: String, field: String },

    /// The same field was resolved twice within one column set
    #[error("Column '{0}' resolved more than once")]
    DuplicateColumn(String),
}

/// A single field value.
///
/// `FieldValue` is the type-agnostic value stored in a [`Record`]. Unset
/// fields hold [`FieldValue::Null`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Unset or null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// String value
    String(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// UUID value
    Uuid(Uuid),

    /// Calendar date
    Date(NaiveDate),

    /// Date/time without timezone
    DateTime(NaiveDateTime),

    /// Date/time in UTC
    DateTimeUtc(DateTime<Utc>),

    /// Time of day
    Time(NaiveTime),

    /// Time interval
    Duration(TimeDelta),
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::Int32(i) => Some(*i as i64),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as a UUID.
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Try to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get this value as a duration.
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTimeUtc(value)
    }
}

impl From<NaiveTime> for FieldValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<TimeDelta> for FieldValue {
    fn from(value: TimeDelta) -> Self {
        Self::Duration(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A resolved (field name, value) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
    /// Field name
    pub column: String,

    /// Resolved value
    pub value: FieldValue,
}

impl ColumnValue {
    /// Create a new column value.
    pub fn new(column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Ordered set of column values resolved during one build.
///
/// Field names are unique within one set.
#[derive(Debug, Clone, Default)]
pub struct ColumnValues {
    columns: Vec<ColumnValue>,
}

impl ColumnValues {
    /// Create an empty column set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, rejecting a name already present.
    pub fn push(&mut self, column: ColumnValue) -> Result<(), AssemblyError> {
        if self.contains(&column.column) {
            return Err(AssemblyError::DuplicateColumn(column.column));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Whether a column with this name was resolved.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.column == column)
    }

    /// Get a resolved value by field name.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| &c.value)
    }

    /// Number of resolved columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column was resolved.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over the columns in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnValue> {
        self.columns.iter()
    }

    /// Project the set into a field name to value map.
    pub fn into_map(self) -> BTreeMap<String, FieldValue> {
        self.columns
            .into_iter()
            .map(|c| (c.column, c.value))
            .collect()
    }
}

/// Primary key column of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Field name of the primary key
    pub name: String,

    /// Whether the store assigns the key on commit
    pub autoincrement: bool,
}

/// An assembled entity instance.
///
/// Every declared field is present; fields left unset hold
/// [`FieldValue::Null`]. Records built for foreign keys are kept under the
/// name of the local foreign-key field. Equality compares the entity name
/// and field values only.
#[derive(Debug, Clone)]
pub struct Record {
    entity: String,
    primary_key: Option<PrimaryKey>,
    fields: BTreeMap<String, FieldValue>,
    related: BTreeMap<String, Record>,
}

impl Record {
    /// Assemble a record from a merged field map.
    ///
    /// Fails when `values` names a field the schema does not declare.
    pub fn assemble(
        schema: &EntitySchema,
        mut values: BTreeMap<String, FieldValue>,
    ) -> Result<Self, AssemblyError> {
        if let Some(unknown) = values.keys().find(|name| schema.field(name).is_none()) {
            return Err(AssemblyError::UnknownField {
                entity: schema.name.clone(),
                field: unknown.clone(),
            });
        }

        let fields = schema
            .fields
            .iter()
            .map(|f| {
                let value = values.remove(&f.name).unwrap_or_default();
                (f.name.clone(), value)
            })
            .collect();

        let primary_key = schema.primary_key().map(|pk| PrimaryKey {
            name: pk.name.clone(),
            autoincrement: pk.autoincrement,
        });

        Ok(Self {
            entity: schema.name.clone(),
            primary_key,
            fields,
            related: BTreeMap::new(),
        })
    }

    /// Attach the records materialized for foreign keys.
    pub fn with_related(mut self, related: BTreeMap<String, Record>) -> Self {
        self.related = related;
        self
    }

    /// Entity name.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Primary key column, if the entity declares one.
    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    /// Current value of the primary key (`Null` when unset or undeclared).
    pub fn key(&self) -> &FieldValue {
        self.primary_key
            .as_ref()
            .and_then(|pk| self.fields.get(&pk.name))
            .unwrap_or(&FieldValue::Null)
    }

    /// Get a field value by name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Replace the value of a declared field.
    ///
    /// Stores use this to write back generated identities.
    pub fn set(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<FieldValue, AssemblyError> {
        match self.fields.get_mut(field) {
            Some(slot) => Ok(std::mem::replace(slot, value.into())),
            None => Err(AssemblyError::UnknownField {
                entity: self.entity.clone(),
                field: field.to_string(),
            }),
        }
    }

    /// All field values, ordered by field name.
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Record materialized for the given foreign-key field.
    pub fn related(&self, foreign_key: &str) -> Option<&Record> {
        self.related.get(foreign_key)
    }

    /// Number of fields (including the primary key).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity && self.fields == other.fields
    }
}
