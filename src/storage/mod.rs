//! Durable key-value storage behind the cart.
//!
//! The cart owns its storage key exclusively and treats the adapter as an
//! injected capability: read the whole value at hydration, write the whole
//! value after mutations. Adapters must tolerate both being called from a
//! background writer thread.

use std::fmt;

mod file;
mod in_memory;

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;

/// Storage key the cart persists under unless reconfigured on the builder.
pub const CART_STORAGE_KEY: &str = "shopping_cart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Io(String),
    LockPoisoned(&'static str),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(message) => write!(f, "storage i/o error: {}", message),
            StorageError::LockPoisoned(operation) => {
                write!(f, "storage lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Abstract durable key-value store.
///
/// Absence of a key is a valid state (`Ok(None)`), not an error.
pub trait CartStorage: Send + Sync {
    /// Read the stored value for `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write (or overwrite) the value for `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
