//! Fire-and-forget persistence.
//!
//! Stores hand a fully encoded value to a [`WriteTracker`], which writes it on a
//! spawned task and returns immediately. Failures are logged and dropped. The
//! tracker remembers in-flight writes so a caller that needs durability (a test,
//! or a CLI about to exit) can [`WriteTracker::settle`] them.
//!
//! Writes to one backend are serialized, and a value older than the one already
//! written for its key is skipped. Spawned tasks may run in any order on a
//! multi-threaded runtime; the backend still ends up with the latest value.
//!
//! Writes run on the first runtime the tracker saw (at construction or on
//! [`WriteTracker::attach`]), so `persist` may be called from any thread.

use super::KvBackend;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub struct WriteTracker {
    backend: Arc<dyn KvBackend>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    next_seq: AtomicU64,
    /// Sequence number of the last successful write per key.
    written: Arc<tokio::sync::Mutex<HashMap<&'static str, u64>>>,
    runtime: OnceLock<Handle>,
}

impl WriteTracker {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        let tracker = Self {
            backend,
            in_flight: Mutex::new(Vec::new()),
            next_seq: AtomicU64::new(0),
            written: Arc::new(tokio::sync::Mutex::new(HashMap::new())),
            runtime: OnceLock::new(),
        };
        tracker.attach();
        tracker
    }

    /// Remembers the current runtime, if there is one and none is known yet.
    /// Stores call this from `load`, which always runs inside a runtime.
    pub fn attach(&self) {
        if let Ok(handle) = Handle::try_current() {
            let _ = self.runtime.set(handle);
        }
    }

    fn runtime(&self) -> Option<Handle> {
        self.runtime
            .get()
            .cloned()
            .or_else(|| Handle::try_current().ok())
    }

    pub fn backend(&self) -> &Arc<dyn KvBackend> {
        &self.backend
    }

    /// Start writing `value` under `key` without waiting for it.
    ///
    /// With no runtime known the write is dropped and logged.
    pub fn persist(&self, key: &'static str, value: String) {
        let Some(runtime) = self.runtime() else {
            tracing::warn!(key, "no async runtime available, write dropped");
            return;
        };
        let backend = Arc::clone(&self.backend);
        let written = Arc::clone(&self.written);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let handle = runtime.spawn(async move {
            let mut written = written.lock().await;
            if written.get(key).is_some_and(|&last| last > seq) {
                tracing::debug!(key, seq, "skipping superseded write");
                return;
            }
            match backend.set(key, &value).await {
                Ok(()) => {
                    written.insert(key, seq);
                    tracing::debug!(key, bytes = value.len(), "persisted");
                }
                Err(e) => tracing::warn!(key, "failed to persist, write dropped: {e}"),
            }
        });

        let mut in_flight = self.lock();
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }

    /// Wait until every write started so far has resolved.
    pub async fn settle(&self) {
        let handles = std::mem::take(&mut *self.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("persist task did not complete: {e}");
            }
        }
    }

    /// Number of writes that have not resolved yet.
    pub fn pending(&self) -> usize {
        self.lock().iter().filter(|h| !h.is_finished()).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[tokio::test]
    async fn test_settle_waits_for_writes() {
        let backend = Arc::new(MemBackend::new());
        let tracker = WriteTracker::new(backend.clone());

        tracker.persist("batches", "[]".to_string());
        tracker.persist("batches", "[1]".to_string());
        tracker.settle().await;

        assert_eq!(backend.write_count(), 2);
        assert_eq!(tracker.pending(), 0);
        assert!(backend.raw("batches").is_some());
    }

    #[tokio::test]
    async fn test_failed_write_is_absorbed() {
        let backend = Arc::new(MemBackend::new());
        backend.set_simulate_write_error(true);
        let tracker = WriteTracker::new(backend.clone());

        tracker.persist("batches", "[]".to_string());
        tracker.settle().await;

        assert_eq!(backend.raw("batches"), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_latest_value_wins_across_threads() {
        let backend = Arc::new(MemBackend::new());
        let tracker = WriteTracker::new(backend.clone());

        for i in 0..50 {
            tracker.persist("batches", format!("[{}]", i));
        }
        tracker.settle().await;

        assert_eq!(backend.raw("batches"), Some("[49]".to_string()));
    }

    #[test]
    fn test_persist_from_outside_the_runtime() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();
        let backend = Arc::new(MemBackend::new());
        let tracker = WriteTracker::new(backend.clone());
        runtime.block_on(async { tracker.attach() });

        tracker.persist("batches", "[]".to_string());
        runtime.block_on(tracker.settle());

        assert_eq!(backend.raw("batches"), Some("[]".to_string()));
    }

    #[test]
    fn test_persist_without_any_runtime_is_dropped() {
        let backend = Arc::new(MemBackend::new());
        let tracker = WriteTracker::new(backend.clone());

        tracker.persist("batches", "[]".to_string());
        assert_eq!(tracker.pending(), 0);
        assert_eq!(backend.raw("batches"), None);
    }
}
