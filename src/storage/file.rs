//! FileStorage - JSON-file-backed storage with an in-memory cache.
//!
//! Stores all key-value pairs in a single JSON object file. The file is
//! read once on open and rewritten in full on every write, so the cart
//! survives process restarts without a database.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use super::{CartStorage, StorageError};

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file at `path`, loading existing data if present.
    ///
    /// A missing file is an empty store; an unreadable or malformed file is
    /// an error so the caller can decide whether to discard it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let cache = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                StorageError::Io(format!(
                    "malformed storage file {}: {}",
                    path.display(),
                    err
                ))
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn write_to_disk(&self, cache: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StorageError::Io(err.to_string()))?;
            }
        }
        let raw = serde_json::to_string(cache).map_err(|err| StorageError::Io(err.to_string()))?;
        fs::write(&self.path, raw).map_err(|err| StorageError::Io(err.to_string()))
    }
}

impl CartStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cache = self
            .cache
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(cache.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        cache.insert(key.to_string(), value.to_string());
        self.write_to_disk(&cache)
    }
}
