//! Saving instances to transactional stores.

use model_builder::{BuildError, ModelBuilder, Overrides};
use model_core::{FieldValue, SchemaCatalog, SchemaProvider};
use model_store::{JsonlStore, MemoryStore, StoreError};
use tempfile::TempDir;
use uuid::Uuid;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("model_builder=debug,model_store=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

fn catalog() -> SchemaCatalog {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/schema.yaml");
    SchemaCatalog::from_file(path).unwrap()
}

#[test]
fn test_save_assigns_identity() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let catalog = catalog();
    let mut store = MemoryStore::new();
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);

    let user = builder.save(&mut store, "users", Overrides::new())?;

    assert_eq!(user.key(), &FieldValue::Int64(1));
    assert_eq!(store.get("users", user.key()), Some(&user));
    Ok(())
}

#[test]
fn test_save_persists_related_entity_first() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let catalog = catalog();
    let mut store = MemoryStore::new().with_constraints(catalog.clone());
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);

    let address = builder.save(&mut store, "addresses", Overrides::new())?;

    assert_eq!(store.count("users"), 1);
    assert_eq!(store.count("addresses"), 1);

    let user_id = address.get("user_id").unwrap();
    assert_eq!(user_id, &FieldValue::Int64(1));

    let stored_user = store.get("users", user_id).unwrap();
    assert_eq!(Some(stored_user), address.related("user_id"));
    assert_eq!(store.get("addresses", address.key()), Some(&address));
    Ok(())
}

#[test]
fn test_save_links_non_integer_keys() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = catalog();
    let mut store = MemoryStore::new().with_constraints(catalog.clone());
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);

    let session = builder.save(&mut store, "sessions", Overrides::new())?;

    let token_id = session.get("token_id").unwrap();
    assert!(token_id.as_uuid().is_some());
    assert!(store.get("api_tokens", token_id).is_some());
    assert_eq!(session.key(), &FieldValue::Int64(1));
    Ok(())
}

#[test]
fn test_two_saves_are_distinct() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = catalog();
    let mut store = MemoryStore::new();
    let mut builder = ModelBuilder::new(&catalog);

    let first = builder.save(&mut store, "users", Overrides::new())?;
    let second = builder.save(&mut store, "users", Overrides::new())?;

    assert_ne!(first.key(), second.key());
    assert_ne!(first.get("name"), second.get("name"));
    assert_eq!(store.count("users"), 2);
    Ok(())
}

#[test]
fn test_minimal_save() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = catalog();
    let mut store = MemoryStore::new();
    let mut builder = ModelBuilder::new(&catalog).with_seed(5).minimal(true);

    let user = builder.save(&mut store, "users", Overrides::new())?;

    assert_eq!(user.key(), &FieldValue::Int64(1));
    assert_eq!(user.get("bio"), Some(&FieldValue::Null));
    assert_eq!(user.get("name").and_then(FieldValue::as_str).map(str::len), Some(16));
    Ok(())
}

#[test]
fn test_invalid_overrides_commit_nothing() {
    let catalog = catalog();
    let mut store = MemoryStore::new();
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);

    let err = builder
        .save(&mut store, "addresses", Overrides::new().set("nickname", "x"))
        .unwrap_err();

    assert!(matches!(err, BuildError::InvalidFieldSet { .. }));
    assert_eq!(store.count("users"), 0);
    assert_eq!(store.count("addresses"), 0);
    assert_eq!(store.staged_count(), 0);
}

#[test]
fn test_store_errors_propagate_unchanged() {
    let catalog = catalog();
    let mut store = MemoryStore::new();
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);
    let token = Uuid::from_u128(0x1234);

    builder
        .save(&mut store, "api_tokens", Overrides::new().set("id", token))
        .unwrap();
    let err = builder
        .save(&mut store, "api_tokens", Overrides::new().set("id", token))
        .unwrap_err();

    let store_err = err.store_error::<StoreError>().unwrap();
    assert!(matches!(store_err, StoreError::DuplicateKey { entity, .. } if entity == "api_tokens"));
    assert_eq!(store.count("api_tokens"), 1);
    assert_eq!(store.staged_count(), 0);
}

#[test]
fn test_exhausted_sequence_commits_nothing() {
    let catalog = catalog();
    let mut store = MemoryStore::new();
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);

    let last = builder
        .save(&mut store, "users", Overrides::new().set("id", i64::MAX))
        .unwrap();
    assert_eq!(last.key(), &FieldValue::Int64(i64::MAX));

    let err = builder
        .save(&mut store, "users", Overrides::new())
        .unwrap_err();

    assert!(matches!(
        err.store_error::<StoreError>(),
        Some(StoreError::SequenceExhausted { entity }) if entity == "users"
    ));
    assert_eq!(store.count("users"), 1);
    assert_eq!(store.staged_count(), 0);
}

#[test]
fn test_dangling_foreign_key_override_rejected_by_constraints() {
    let catalog = catalog();
    let mut store = MemoryStore::new().with_constraints(catalog.clone());
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);

    let err = builder
        .save(&mut store, "addresses", Overrides::new().set("user_id", 99))
        .unwrap_err();

    assert!(matches!(
        err.store_error::<StoreError>(),
        Some(StoreError::ForeignKeyViolation { .. })
    ));
    assert_eq!(store.count("users"), 0);
}

#[test]
fn test_save_to_jsonl_store() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let catalog = catalog();
    let temp_dir = TempDir::new()?;
    let mut store = JsonlStore::open(temp_dir.path())?;
    let mut builder = ModelBuilder::new(&catalog).with_seed(42);

    for _ in 0..2 {
        builder.save(&mut store, "addresses", Overrides::new())?;
    }

    let users = store.read(&catalog.inspect("users")?)?;
    let addresses = store.read(&catalog.inspect("addresses")?)?;
    assert_eq!(users.len(), 2);
    assert_eq!(addresses.len(), 2);

    for (address, user) in addresses.iter().zip(&users) {
        assert_eq!(
            address.get("user_id").and_then(FieldValue::as_i64),
            user.key().as_i64()
        );
    }
    assert_eq!(users[1].key(), &FieldValue::Int64(2));

    // A reopened store continues the sequences
    let mut reopened = JsonlStore::open(temp_dir.path())?;
    let user = builder.save(&mut reopened, "users", Overrides::new())?;
    assert_eq!(user.key(), &FieldValue::Int64(3));
    Ok(())
}
