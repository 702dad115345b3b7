//! Persistent key-value storage seam.
//!
//! The host environment owns real persistence; the pipeline only needs named
//! string records. Two implementations are provided: an in-memory store for
//! tests and a flat-file JSON-per-key store for the replay binary.

use crate::{Error, Result};
use log::debug;
use std::collections::HashMap;
use std::path::PathBuf;

/// Named string-record storage
pub trait KeyValueStore {
    /// Read a record; `Ok(None)` means the record has never been written
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the backing store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write or replace a record
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the backing store cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store backed by a `HashMap`
#[derive(Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per record key, stored as `<dir>/<key>.json`
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::Storage(format!("create store directory {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!("read {}: {e}", path.display()))),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        debug!("Writing record {key} to {}", path.display());
        std::fs::write(&path, value).map_err(|e| Error::Storage(format!("write {}: {e}", path.display())))
    }
}
