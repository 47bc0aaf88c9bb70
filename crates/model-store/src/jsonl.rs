//! JSON Lines store.
//!
//! Every entity is written to `<dir>/<entity>.jsonl`, one record per line.
//! Files are only ever appended to.

use crate::error::StoreError;
use crate::sequence::Sequences;
use json_types::{record_from_json, record_to_json};
use model_core::{EntitySchema, Record, TransactionalStore};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Append-only store writing one JSONL file per entity.
///
/// Auto-increment sequences resume from the largest key already present in
/// an entity's file. Primary-key uniqueness is not checked against rows
/// written by other processes.
#[derive(Debug)]
pub struct JsonlStore {
    dir: PathBuf,
    sequences: Sequences,
    staged: Vec<Record>,
}

impl JsonlStore {
    /// Open a store in `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        info!("Opened JSONL store at '{}'", dir.display());
        Ok(Self {
            dir,
            sequences: Sequences::new(),
            staged: Vec::new(),
        })
    }

    /// Directory holding the entity files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for an entity.
    pub fn path_for(&self, entity: &str) -> PathBuf {
        self.dir.join(format!("{entity}.jsonl"))
    }

    /// Read back every stored record of an entity.
    pub fn read(&self, schema: &EntitySchema) -> Result<Vec<Record>, StoreError> {
        let path = self.path_for(&schema.name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let json: serde_json::Value = serde_json::from_str(&line)?;
            records.push(record_from_json(schema, &json)?);
        }
        Ok(records)
    }

    /// Seed an entity's sequence from its file on first use.
    fn load_sequence(&mut self, record: &Record) -> Result<(), StoreError> {
        let entity = record.entity();
        if self.sequences.contains(entity) {
            return Ok(());
        }
        let Some(pk) = record.primary_key().filter(|pk| pk.autoincrement) else {
            return Ok(());
        };

        let mut last = 0;
        let path = self.path_for(entity);
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let json: serde_json::Value = serde_json::from_str(&line)?;
                if let Some(key) = json.get(&pk.name).and_then(serde_json::Value::as_i64) {
                    last = last.max(key);
                }
            }
            debug!("Resuming '{}' sequence after key {}", entity, last);
        }

        self.sequences.observe(entity, last);
        Ok(())
    }

    fn append(&self, entity: &str, lines: &[String]) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(entity))?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        for line in lines {
            writer.write_all(line.as_bytes())?;
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl TransactionalStore for JsonlStore {
    type Error = StoreError;

    fn add(&mut self, record: Record) -> Result<(), StoreError> {
        self.staged.push(record);
        Ok(())
    }

    fn commit(&mut self) -> Result<Vec<Record>, StoreError> {
        let staged = std::mem::take(&mut self.staged);

        // Serialize everything before touching any file
        let mut batch = Vec::with_capacity(staged.len());
        let mut lines: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for mut record in staged {
            self.load_sequence(&record)?;
            self.sequences.assign(&mut record)?;
            let line = serde_json::to_string(&record_to_json(&record))?;
            lines
                .entry(record.entity().to_string())
                .or_default()
                .push(line);
            batch.push(record);
        }

        for (entity, entity_lines) in &lines {
            self.append(entity, entity_lines)?;
            debug!(
                "Appended {} records to '{}'",
                entity_lines.len(),
                self.path_for(entity).display()
            );
        }

        Ok(batch)
    }

    fn rollback(&mut self) {
        self.staged.clear();
    }
}
