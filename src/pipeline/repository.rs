//! Key/value persistence for pipeline inputs and results.
//!
//! The pipeline never touches storage directly; it is handed a
//! [`Repository`]. Values are JSON documents so any front end reading the
//! same keys sees the same layout.

use crate::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key holding the input [`crate::data::Dataset`].
pub const DATA_KEY: &str = "data";

/// Key set to `true` once a run has persisted its results.
pub const IS_CALCULATED_KEY: &str = "isCalculated";

/// Abstract read/write store used by [`super::Pipeline`].
pub trait Repository {
    /// Value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-process repository, mainly for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRepository {
    entries: BTreeMap<String, Value>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Repository for MemoryRepository {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Repository persisted as a single JSON object file.
///
/// The whole file is read on [`FileRepository::open`] and rewritten on
/// every [`Repository::set`].
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileRepository {
    /// Opens `path`, starting empty if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error if an existing file cannot be
    /// read as a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries: BTreeMap<String, Value> = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "opened file repository");
        Ok(Self { path, entries })
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file each flush writes before renaming it over the store.
    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn flush(&self) -> Result<()> {
        // Write to disk atomically via temp file
        let temp_path = self.temp_path();
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl Repository for FileRepository {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}
