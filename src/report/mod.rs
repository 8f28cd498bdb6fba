//! Failure reporting for the persistence paths.
//!
//! Persistence failures never propagate to cart callers; the in-memory
//! state stays authoritative for the session. They are routed here instead,
//! through an injected collaborator, so hosts can log, count, or surface a
//! non-blocking "changes may not be saved" warning.

use std::sync::{Arc, Mutex};

use crate::storage::StorageError;

/// Collaborator invoked on the cart's two recoverable failure paths.
pub trait Reporter: Send + Sync {
    /// Hydration could not use the persisted value (unreadable, malformed,
    /// or an individual entry violated an invariant). The cart continues
    /// with whatever could be salvaged.
    fn restore_failed(&self, key: &str, reason: &str);

    /// A write-through failed. The in-memory mutation already succeeded and
    /// stands; the cart may simply not survive a restart.
    fn persist_failed(&self, key: &str, error: &StorageError);
}

/// Default reporter: structured warnings via `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn restore_failed(&self, key: &str, reason: &str) {
        tracing::warn!(key, reason, "cart restore failed, continuing with salvaged state");
    }

    fn persist_failed(&self, key: &str, error: &StorageError) {
        tracing::warn!(key, error = %error, "cart write-through failed, in-memory state retained");
    }
}

/// Reporter that captures report lines into a shared buffer.
pub struct BufferReporter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Default for BufferReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::with_buffer(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn with_buffer(lines: Arc<Mutex<Vec<String>>>) -> Self {
        Self { lines }
    }

    /// Snapshot of the captured report lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Reporter for BufferReporter {
    fn restore_failed(&self, key: &str, reason: &str) {
        self.push(format!("restore {}: {}", key, reason));
    }

    fn persist_failed(&self, key: &str, error: &StorageError) {
        self.push(format!("persist {}: {}", key, error));
    }
}
