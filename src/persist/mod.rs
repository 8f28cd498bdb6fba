//! Background write-behind worker for cart snapshots.
//!
//! Mutations update the in-memory cart synchronously; durability is handed
//! to this worker so a slow or hung storage write never blocks the next
//! mutation. Snapshots are applied in submission order, and a run of
//! pending snapshots is coalesced to the newest before the physical write,
//! so the final persisted state always matches the final in-memory state.
//!
//! Follows the spawn / do work / stop-and-collect-stats pattern.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::report::Reporter;
use crate::storage::{CartStorage, StorageError};

enum Command {
    Persist(String),
    Flush(Sender<Result<(), StorageError>>),
    Stop,
}

/// Counters collected over the worker's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriterStats {
    /// Snapshots submitted to the worker.
    pub snapshots: usize,
    /// Physical storage writes performed.
    pub writes: usize,
    /// Snapshots skipped because a newer one was already queued.
    pub coalesced: usize,
    /// Writes that failed and were reported.
    pub failures: usize,
}

/// Handle to the write-behind worker thread.
pub struct WriteBehind {
    tx: Sender<Command>,
    handle: Option<JoinHandle<WriterStats>>,
}

impl WriteBehind {
    /// Spawn a worker writing snapshots of `key` through `storage`.
    pub fn spawn(
        storage: Arc<dyn CartStorage>,
        key: impl Into<String>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let key = key.into();
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || run(rx, storage, key, reporter));

        Self {
            tx,
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for writing. Returns false if the worker is gone.
    pub fn submit(&self, snapshot: String) -> bool {
        self.tx.send(Command::Persist(snapshot)).is_ok()
    }

    /// Block until every snapshot submitted so far has been applied, and
    /// return the outcome of the most recent physical write.
    pub fn flush(&self) -> Result<(), StorageError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_err() {
            return Err(StorageError::Io("write-behind worker stopped".to_string()));
        }
        ack_rx
            .recv()
            .unwrap_or_else(|_| Err(StorageError::Io("write-behind worker stopped".to_string())))
    }

    /// Stop the worker after draining queued snapshots and collect stats.
    pub fn stop(mut self) -> WriterStats {
        let _ = self.tx.send(Command::Stop);
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    }
}

impl Drop for WriteBehind {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Stop);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(
    rx: Receiver<Command>,
    storage: Arc<dyn CartStorage>,
    key: String,
    reporter: Arc<dyn Reporter>,
) -> WriterStats {
    let mut stats = WriterStats::default();
    let mut last_result: Result<(), StorageError> = Ok(());
    let mut pending: Option<Command> = None;

    loop {
        let command = match pending.take() {
            Some(command) => command,
            None => match rx.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };

        match command {
            Command::Persist(mut snapshot) => {
                stats.snapshots += 1;
                // Coalesce the queued run: only the newest snapshot matters.
                loop {
                    match rx.try_recv() {
                        Ok(Command::Persist(newer)) => {
                            stats.snapshots += 1;
                            stats.coalesced += 1;
                            snapshot = newer;
                        }
                        Ok(other) => {
                            pending = Some(other);
                            break;
                        }
                        Err(_) => break,
                    }
                }

                let result = storage.write(&key, &snapshot);
                stats.writes += 1;
                if let Err(error) = &result {
                    stats.failures += 1;
                    reporter.persist_failed(&key, error);
                }
                last_result = result;
            }
            Command::Flush(ack) => {
                let _ = ack.send(last_result.clone());
            }
            Command::Stop => break,
        }
    }

    stats
}
