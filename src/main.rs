//! Command-line interface for model-builder
//!
//! # Usage Examples
//!
//! ```bash
//! # Print three random users as JSON lines
//! model-builder --schema schema.yaml --entity users --count 3 --seed 42
//!
//! # Save addresses (and the users they reference) to JSONL files
//! model-builder --schema schema.yaml --entity addresses \
//!   --set email_address=someone@example.com \
//!   --output-dir ./out
//!
//! # Leave nullable fields unset, with options from a file
//! model-builder --schema schema.yaml --entity users --minimal --config builder.toml
//! ```

use anyhow::Context;
use clap::Parser;
use json_types::{parse_override, record_to_jsonl};
use model_builder::{BuildOptions, ModelBuilder, Overrides};
use model_core::{FieldValue, SchemaCatalog, SchemaProvider};
use model_store::JsonlStore;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "model-builder")]
#[command(about = "Build randomized entity instances from a YAML schema")]
#[command(long_about = None)]
struct Cli {
    /// Path to schema YAML file
    #[arg(long, short = 's')]
    schema: PathBuf,

    /// Entity to build
    #[arg(long, short = 'e')]
    entity: String,

    /// Number of instances to build
    #[arg(long, default_value = "1")]
    count: u64,

    /// Random seed (same seed = same instances)
    #[arg(long, env = "MODEL_BUILDER_SEED")]
    seed: Option<u64>,

    /// Leave nullable fields unset
    #[arg(long)]
    minimal: bool,

    /// Field value to use instead of a random one (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Save instances to JSONL files in this directory (one file per entity)
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Builder options file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => BuildOptions::from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => BuildOptions::default(),
    };
    options.minimal |= cli.minimal;
    if cli.seed.is_some() {
        options.seed = cli.seed;
    }

    let catalog = SchemaCatalog::from_file(&cli.schema)
        .with_context(|| format!("Failed to load schema from {}", cli.schema.display()))?;
    let overrides = parse_overrides(&catalog, &cli.entity, &cli.set)?;

    let mut builder = ModelBuilder::with_options(&catalog, options);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.output_dir {
        Some(dir) => {
            let mut store = JsonlStore::open(dir)
                .with_context(|| format!("Failed to open store at {}", dir.display()))?;
            for _ in 0..cli.count {
                let record = builder
                    .save(&mut store, &cli.entity, overrides.clone())
                    .with_context(|| format!("Failed to save '{}'", cli.entity))?;
                out.write_all(record_to_jsonl(&record)?.as_bytes())?;
            }
            info!(
                "Saved {} '{}' instances to {}",
                cli.count,
                cli.entity,
                dir.display()
            );
        }
        None => {
            for _ in 0..cli.count {
                let record = builder
                    .build(&cli.entity, overrides.clone())
                    .with_context(|| format!("Failed to build '{}'", cli.entity))?;
                out.write_all(record_to_jsonl(&record)?.as_bytes())?;
            }
            info!("Built {} '{}' instances", cli.count, cli.entity);
        }
    }

    out.flush()?;
    Ok(())
}

/// Parse `--set` values with the declared field types.
///
/// Names the entity does not declare are kept as text so the builder
/// reports them.
fn parse_overrides(
    catalog: &SchemaCatalog,
    entity: &str,
    assignments: &[(String, String)],
) -> anyhow::Result<Overrides> {
    let schema = catalog
        .inspect(entity)
        .with_context(|| format!("Unknown entity '{entity}'"))?;

    let mut overrides = Overrides::new();
    for (name, raw) in assignments {
        let value = match schema.field(name) {
            Some(field) => parse_override(&field.field_type, raw)
                .with_context(|| format!("Invalid value for '{name}'"))?,
            None => FieldValue::String(raw.clone()),
        };
        overrides.insert(name.clone(), value);
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=Alice").unwrap(),
            ("name".to_string(), "Alice".to_string())
        );
        assert_eq!(
            parse_assignment("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert!(parse_assignment("name").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "model-builder",
            "--schema",
            "schema.yaml",
            "--entity",
            "users",
            "--set",
            "name=Alice",
            "--set",
            "age=30",
            "--minimal",
        ])
        .unwrap();

        assert_eq!(cli.entity, "users");
        assert_eq!(cli.count, 1);
        assert!(cli.minimal);
        assert_eq!(cli.set.len(), 2);
        assert!(cli.output_dir.is_none());
    }

    #[test]
    fn test_parse_overrides_uses_field_types() {
        let catalog = SchemaCatalog::from_yaml(
            r#"
entities:
  - name: users
    fields:
      - { name: name, type: text }
      - { name: age, type: int }
"#,
        )
        .unwrap();
        let assignments = vec![
            ("age".to_string(), "30".to_string()),
            ("name".to_string(), "42".to_string()),
            ("nickname".to_string(), "al".to_string()),
        ];

        let overrides = parse_overrides(&catalog, "users", &assignments).unwrap();
        assert_eq!(overrides.get("age"), Some(&FieldValue::Int32(30)));
        assert_eq!(overrides.get("name"), Some(&FieldValue::from("42")));
        assert_eq!(overrides.get("nickname"), Some(&FieldValue::from("al")));

        let bad = vec![("age".to_string(), "old".to_string())];
        assert!(parse_overrides(&catalog, "users", &bad).is_err());
    }
}
