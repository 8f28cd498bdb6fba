use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cartkit::{BufferReporter, CartStorage, InMemoryStorage, StorageError, WriteBehind};

/// Storage whose writes take long enough that submissions pile up behind
/// an in-flight write.
struct SlowStorage {
    inner: InMemoryStorage,
    delay: Duration,
}

impl CartStorage for SlowStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        thread::sleep(self.delay);
        self.inner.write(key, value)
    }
}

#[test]
fn last_write_wins_over_a_slow_backend() {
    let inner = InMemoryStorage::new();
    let storage = Arc::new(SlowStorage {
        inner: inner.clone(),
        delay: Duration::from_millis(50),
    });
    let writer = WriteBehind::spawn(storage, "shopping_cart", Arc::new(BufferReporter::new()));

    // Submissions return immediately even while a write is sleeping.
    assert!(writer.submit(r#"["a"]"#.to_string()));
    assert!(writer.submit(r#"["a","b"]"#.to_string()));
    assert!(writer.submit(r#"["a","b","c"]"#.to_string()));
    writer.flush().unwrap();

    assert_eq!(
        inner.read("shopping_cart").unwrap().as_deref(),
        Some(r#"["a","b","c"]"#)
    );

    let stats = writer.stop();
    assert_eq!(stats.snapshots, 3);
    assert!(stats.coalesced >= 1);
    assert_eq!(stats.writes + stats.coalesced, stats.snapshots);
    assert_eq!(stats.failures, 0);
}

#[test]
fn snapshots_apply_in_submission_order() {
    let storage = InMemoryStorage::new();
    let writer = WriteBehind::spawn(
        Arc::new(storage.clone()),
        "shopping_cart",
        Arc::new(BufferReporter::new()),
    );

    for n in 1..=20 {
        writer.submit(format!("[{}]", n));
    }
    writer.flush().unwrap();

    assert_eq!(storage.read("shopping_cart").unwrap().as_deref(), Some("[20]"));
    writer.stop();
}

#[test]
fn stop_drains_queued_snapshots() {
    let storage = InMemoryStorage::new();
    let writer = WriteBehind::spawn(
        Arc::new(storage.clone()),
        "shopping_cart",
        Arc::new(BufferReporter::new()),
    );

    writer.submit("[\"final\"]".to_string());
    let stats = writer.stop();

    assert_eq!(stats.snapshots, 1);
    assert_eq!(
        storage.read("shopping_cart").unwrap().as_deref(),
        Some("[\"final\"]")
    );
}
