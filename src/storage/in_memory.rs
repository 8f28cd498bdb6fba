//! InMemoryStorage - HashMap-backed storage for testing and ephemeral carts.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{CartStorage, StorageError};

/// In-memory storage backed by a HashMap.
///
/// Clone-friendly via Arc: clones share the same underlying map, so a clone
/// handed to the cart and one kept by a test observe the same writes.
#[derive(Clone)]
pub struct InMemoryStorage {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl CartStorage for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(storage.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        storage.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
