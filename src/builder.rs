//! Entity builder.
//!
//! The builder inspects an entity through a [`SchemaProvider`], builds every
//! entity its foreign keys point to (depth first), fills the remaining
//! fields with random values and assembles a [`Record`]. With
//! [`ModelBuilder::save`] every built record is committed to a store before
//! the record that references it is assembled.

use crate::error::BuildError;
use crate::options::BuildOptions;
use crate::overrides::Overrides;
use model_core::{
    AssemblyError, ColumnValue, ColumnValues, FieldValue, Record, SchemaError, SchemaProvider,
    TransactionalStore,
};
use model_generator::RandomValueProvider;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Store seen through the builder: one record in, one committed record out.
trait Persist {
    fn persist(&mut self, record: Record) -> Result<Record, BuildError>;
}

impl<S: TransactionalStore> Persist for S {
    fn persist(&mut self, record: Record) -> Result<Record, BuildError> {
        let entity = record.entity().to_string();

        let mut tx = self.transaction();
        tx.add(record).map_err(BuildError::store)?;
        let mut committed = tx.commit().map_err(BuildError::store)?;

        debug!("Committed '{}' instance", entity);
        committed.pop().ok_or(BuildError::EmptyCommit(entity))
    }
}

/// Builds randomized instances of mapped entities.
///
/// # Example
///
/// ```rust
/// use model_builder::{ModelBuilder, Overrides};
/// use model_core::{FieldValue, SchemaCatalog};
///
/// let catalog = SchemaCatalog::from_yaml(r#"
/// entities:
///   - name: users
///     fields:
///       - name: id
///         type: int
///         primary_key: true
///         autoincrement: true
///       - name: name
///         type: text
/// "#).unwrap();
///
/// let mut builder = ModelBuilder::new(&catalog).with_seed(42);
/// let user = builder.build("users", Overrides::new()).unwrap();
///
/// assert_eq!(user.key(), &FieldValue::Null);
/// assert_eq!(user.get("name").and_then(FieldValue::as_str).map(str::len), Some(16));
/// ```
pub struct ModelBuilder<P> {
    schemas: P,
    values: RandomValueProvider,
    options: BuildOptions,
}

impl<P: SchemaProvider> ModelBuilder<P> {
    /// Create a builder with default options and an OS-seeded random source.
    pub fn new(schemas: P) -> Self {
        Self::with_options(schemas, BuildOptions::default())
    }

    /// Create a builder from options.
    pub fn with_options(schemas: P, options: BuildOptions) -> Self {
        let values = match options.seed {
            Some(seed) => RandomValueProvider::new(seed),
            None => RandomValueProvider::from_os_rng(),
        };
        Self {
            schemas,
            values,
            options,
        }
    }

    /// Reseed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self.values = RandomValueProvider::new(seed);
        self
    }

    /// Leave nullable fields unset.
    pub fn minimal(mut self, minimal: bool) -> Self {
        self.options.minimal = minimal;
        self
    }

    /// Bound the depth of relationship recursion.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Schema provider the builder inspects.
    pub fn schemas(&self) -> &P {
        &self.schemas
    }

    /// Mutable access to the schema provider.
    ///
    /// Changes are seen by the next build.
    pub fn schemas_mut(&mut self) -> &mut P {
        &mut self.schemas
    }

    /// Build an instance without persisting anything.
    ///
    /// Related entities are built too and kept on the record; auto-increment
    /// keys stay unset, so foreign keys pointing at them are unset as well.
    pub fn build(&mut self, entity: &str, overrides: Overrides) -> Result<Record, BuildError> {
        self.resolve(entity, overrides, None, 0)
    }

    /// Build an instance and commit it, with its related entities, to `store`.
    ///
    /// Each related entity is committed in its own transaction before the
    /// record referencing it is assembled. The returned record carries the
    /// identity assigned by the store.
    pub fn save<S: TransactionalStore>(
        &mut self,
        store: &mut S,
        entity: &str,
        overrides: Overrides,
    ) -> Result<Record, BuildError> {
        let record = self.resolve(entity, overrides, Some(&mut *store as &mut dyn Persist), 0)?;
        store.persist(record)
    }

    fn resolve(
        &mut self,
        entity: &str,
        overrides: Overrides,
        mut store: Option<&mut (dyn Persist + '_)>,
        depth: usize,
    ) -> Result<Record, BuildError> {
        if depth > self.options.max_depth {
            return Err(BuildError::RelationshipDepthExceeded {
                entity: entity.to_string(),
                limit: self.options.max_depth,
            });
        }

        let schema = self.schemas.inspect(entity)?;
        debug!(entity = %schema.name, depth, "Resolving entity");

        // Reject unknown overrides before anything is built or committed
        if let Some(unknown) = overrides.names().find(|name| schema.field(name).is_none()) {
            return Err(BuildError::InvalidFieldSet {
                entity: schema.name.clone(),
                source: AssemblyError::UnknownField {
                    entity: schema.name.clone(),
                    field: unknown.to_string(),
                },
            });
        }

        let invalid = |source| BuildError::InvalidFieldSet {
            entity: schema.name.clone(),
            source,
        };

        let mut columns = ColumnValues::new();
        let mut related = BTreeMap::new();

        for relationship in &schema.relationships {
            if overrides.contains(&relationship.foreign_key) {
                trace!(field = %relationship.foreign_key, "Foreign key overridden");
                continue;
            }

            let target = self.resolve(
                &relationship.target_entity,
                Overrides::new(),
                store.as_deref_mut(),
                depth + 1,
            )?;
            let target = match store.as_deref_mut() {
                Some(store) => store.persist(target)?,
                None => target,
            };

            let key = target.get(&relationship.target_key).cloned().ok_or_else(|| {
                SchemaError::InvalidReference(format!(
                    "{}.{} references missing field {}.{}",
                    schema.name,
                    relationship.foreign_key,
                    relationship.target_entity,
                    relationship.target_key
                ))
            })?;

            columns
                .push(ColumnValue::new(&relationship.foreign_key, key))
                .map_err(invalid)?;
            related.insert(relationship.foreign_key.clone(), target);
        }

        for field in &schema.fields {
            if field.is_foreign_key() {
                continue;
            }
            if field.autoincrement {
                trace!(field = %field.name, "Left for the store to assign");
                continue;
            }
            if self.options.minimal && field.nullable {
                trace!(field = %field.name, "Skipped nullable field");
                continue;
            }

            let value = self.values.value_for(&field.field_type)?;
            trace!(field = %field.name, ?value, "Generated value");
            columns
                .push(ColumnValue::new(&field.name, value))
                .map_err(invalid)?;
        }

        let mut values: BTreeMap<String, FieldValue> = columns.into_map();
        values.extend(overrides);

        let record = Record::assemble(&schema, values).map_err(invalid)?;
        Ok(record.with_related(related))
    }
}
