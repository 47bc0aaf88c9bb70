//! Schema descriptors for model-builder.
//!
//! ## Type Hierarchy
//!
//! **Descriptors** (read-only views handed to the builder):
//! - `FieldDescriptor` - Single field metadata
//! - `RelationshipDescriptor` - Foreign key to a target entity
//! - `EntitySchema` - Fields and relationships of one entity
//!
//! **Providers**:
//! - `SchemaProvider` - Capability to inspect an entity by name
//! - `SchemaCatalog` - Provider backed by YAML or programmatic definitions

use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The entity cannot be inspected as a mapped entity
    #[error("'{0}' is not a mapped entity")]
    NotInspectable(String),

    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Foreign key reference not in `entity.field` form
    #[error("Invalid foreign key reference '{0}', expected 'entity.field'")]
    InvalidReference(String),

    /// The same field is declared twice on one entity
    #[error("Field '{field}' declared more than once on entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    /// The same entity is declared twice in one catalog
    #[error("Entity '{0}' declared more than once")]
    DuplicateEntity(String),
}

// ============================================================================
// Descriptors
// ============================================================================

/// Target of a foreign key, written `entity.field` in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ForeignKeyRef {
    /// Target entity name
    pub entity: String,

    /// Target primary-key field
    pub field: String,
}

impl ForeignKeyRef {
    /// Create a new reference.
    pub fn new(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            field: field.into(),
        }
    }
}

impl TryFrom<String> for ForeignKeyRef {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.rsplit_once('.') {
            Some((entity, field)) if !entity.is_empty() && !field.is_empty() => {
                Ok(Self::new(entity, field))
            }
            _ => Err(SchemaError::InvalidReference(value)),
        }
    }
}

impl From<ForeignKeyRef> for String {
    fn from(value: ForeignKeyRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ForeignKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.field)
    }
}

/// Field metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,

    /// Declared semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether this field may be left null
    #[serde(default)]
    pub nullable: bool,

    /// Whether this field is the entity's primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Whether the store assigns this field on commit
    #[serde(default)]
    pub autoincrement: bool,

    /// Entity and field this foreign key points to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ForeignKeyRef>,
}

impl FieldDescriptor {
    /// Create a new non-nullable field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable: false,
            primary_key: false,
            autoincrement: false,
            references: None,
        }
    }

    /// Mark the field nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the field as primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the field as store-assigned.
    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    /// Make the field a foreign key to `entity.field`.
    pub fn references(mut self, entity: impl Into<String>, field: impl Into<String>) -> Self {
        self.references = Some(ForeignKeyRef::new(entity, field));
        self
    }

    /// Whether the field's value must reference another entity.
    pub fn is_foreign_key(&self) -> bool {
        self.references.is_some()
    }
}

/// Foreign-key relationship from a local field to a target entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    /// Local foreign-key field
    pub foreign_key: String,

    /// Target entity name
    pub target_entity: String,

    /// Target entity's primary-key field
    pub target_key: String,
}

/// Fields and relationships of one mapped entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    /// Entity name
    pub name: String,

    /// Field descriptors, in declaration order
    pub fields: Vec<FieldDescriptor>,

    /// Relationships, one per foreign-key field
    pub relationships: Vec<RelationshipDescriptor>,
}

impl EntitySchema {
    /// Create an entity schema, deriving relationships from foreign keys.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let relationships = fields
            .iter()
            .filter_map(|f| {
                f.references.as_ref().map(|r| RelationshipDescriptor {
                    foreign_key: f.name.clone(),
                    target_entity: r.entity.clone(),
                    target_key: r.field.clone(),
                })
            })
            .collect();

        Self {
            name: name.into(),
            fields,
            relationships,
        }
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The primary-key field, if declared.
    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

// ============================================================================
// Providers
// ============================================================================

/// Capability to inspect mapped entities.
///
/// Implementations must return [`SchemaError::NotInspectable`] for names
/// that are not mapped entities. Views are returned by value: callers
/// inspect again on every build and never cache.
pub trait SchemaProvider {
    /// Inspect an entity by name.
    fn inspect(&self, entity: &str) -> Result<EntitySchema, SchemaError>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    fn inspect(&self, entity: &str) -> Result<EntitySchema, SchemaError> {
        (**self).inspect(entity)
    }
}

/// Entity as declared in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// Entity name
    pub name: String,

    /// Field definitions
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDefinition {
    fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    entity: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default = "default_version")]
    version: u32,
    entities: Vec<EntityDefinition>,
}

/// Schema provider backed by entity definitions.
///
/// Definitions are loaded from YAML or registered in code. The catalog can
/// be changed between builds; every `inspect` reflects its current content.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    version: u32,
    entities: BTreeMap<String, EntityDefinition>,
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            version: default_version(),
            entities: BTreeMap::new(),
        }
    }

    /// Load a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let mut catalog = Self {
            version: file.version,
            entities: BTreeMap::new(),
        };
        for entity in file.entities {
            if catalog.entities.contains_key(&entity.name) {
                return Err(SchemaError::DuplicateEntity(entity.name));
            }
            catalog.register(entity)?;
        }
        Ok(catalog)
    }

    /// Add or replace an entity definition.
    pub fn register(&mut self, entity: EntityDefinition) -> Result<(), SchemaError> {
        entity.validate()?;
        self.entities.insert(entity.name.clone(), entity);
        Ok(())
    }

    /// Remove an entity definition.
    pub fn remove(&mut self, name: &str) -> Option<EntityDefinition> {
        self.entities.remove(name)
    }

    /// Schema file version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Get all entity names in the catalog.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }
}

impl SchemaProvider for SchemaCatalog {
    fn inspect(&self, entity: &str) -> Result<EntitySchema, SchemaError> {
        let definition = self
            .entities
            .get(entity)
            .ok_or_else(|| SchemaError::NotInspectable(entity.to_string()))?;
        Ok(EntitySchema::new(
            definition.name.clone(),
            definition.fields.clone(),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
