//! # Preference Store
//!
//! Holds the preferred [`VolumeUnit`], with the same load/save discipline as the
//! batch store. The stored value is the bare token (`L` or `Gal`), not JSON.
//!
//! - `load` keeps the current unit when the key is missing, unreadable, or holds
//!   anything other than one of the two tokens.
//! - `save` changes the in-memory unit immediately and writes in the background.
//! - `load` waits for pending saves before reading, and a save made while the
//!   read is in flight wins over what the read returns.

use super::writer::WriteTracker;
use super::{KvBackend, LoadState, PREFERRED_VOLUME_UNIT_KEY};
use crate::model::VolumeUnit;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreferenceSnapshot {
    pub state: LoadState,
    pub unit: VolumeUnit,
    /// Bumped by every save.
    pub revision: u64,
}

pub struct PreferenceStore {
    state: watch::Sender<PreferenceSnapshot>,
    writes: WriteTracker,
    loads: AtomicU64,
}

impl PreferenceStore {
    pub fn new(backend: Arc<dyn KvBackend>, default_unit: VolumeUnit) -> Self {
        let (state, _) = watch::channel(PreferenceSnapshot {
            state: LoadState::Uninitialized,
            unit: default_unit,
            revision: 0,
        });
        Self {
            state,
            writes: WriteTracker::new(backend),
            loads: AtomicU64::new(0),
        }
    }

    pub async fn activate(&self) {
        self.state.send_modify(|s| s.state = LoadState::Loading);
        self.load().await;
    }

    pub async fn load(&self) {
        self.writes.attach();
        let mut generation = 0;
        let mut started_at = 0;
        self.state.send_if_modified(|s| {
            generation = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
            started_at = s.revision;
            false
        });

        self.writes.settle().await;
        let stored = match self.writes.backend().get(PREFERRED_VOLUME_UNIT_KEY).await {
            Ok(Some(token)) => {
                let unit = VolumeUnit::from_token(token.trim());
                if unit.is_none() {
                    tracing::warn!(token = %token, "ignoring unknown volume unit");
                }
                unit
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to load preferred volume unit: {e}");
                None
            }
        };

        self.state.send_if_modified(|s| {
            if self.loads.load(Ordering::SeqCst) != generation {
                return false;
            }
            if let Some(unit) = stored.filter(|_| s.revision == started_at) {
                s.unit = unit;
            }
            s.state = LoadState::Ready;
            true
        });
    }

    /// Sets the unit. Reads reflect it immediately; the write lands later.
    pub fn save(&self, unit: VolumeUnit) {
        self.state.send_if_modified(|s| {
            let changed = s.unit != unit;
            s.unit = unit;
            s.revision += 1;
            changed
        });
        self.writes
            .persist(PREFERRED_VOLUME_UNIT_KEY, unit.token().to_string());
    }

    pub async fn settle(&self) {
        self.writes.settle().await;
    }

    pub fn unit(&self) -> VolumeUnit {
        self.state.borrow().unit
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().state
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreferenceSnapshot> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn store_on(backend: &Arc<MemBackend>) -> PreferenceStore {
        PreferenceStore::new(backend.clone(), VolumeUnit::Liters)
    }

    #[tokio::test]
    async fn test_defaults_before_and_after_empty_load() {
        let backend = Arc::new(MemBackend::new());
        let store = store_on(&backend);
        assert_eq!(store.state(), LoadState::Uninitialized);
        assert_eq!(store.unit(), VolumeUnit::Liters);

        store.activate().await;
        assert_eq!(store.state(), LoadState::Ready);
        assert_eq!(store.unit(), VolumeUnit::Liters);
    }

    #[tokio::test]
    async fn test_save_survives_restart() {
        let backend = Arc::new(MemBackend::new());
        let store = store_on(&backend);
        store.activate().await;

        store.save(VolumeUnit::Gallons);
        assert_eq!(store.unit(), VolumeUnit::Gallons);
        store.settle().await;
        assert_eq!(
            backend.raw(PREFERRED_VOLUME_UNIT_KEY),
            Some("Gal".to_string())
        );

        let restarted = store_on(&backend);
        restarted.activate().await;
        assert_eq!(restarted.unit(), VolumeUnit::Gallons);
    }

    #[tokio::test]
    async fn test_invalid_token_keeps_previous_value() {
        let backend = Arc::new(MemBackend::new());
        let store = store_on(&backend);
        store.activate().await;
        store.save(VolumeUnit::Gallons);
        store.settle().await;

        backend.insert_raw(PREFERRED_VOLUME_UNIT_KEY, "Barrels");
        store.activate().await;
        assert_eq!(store.unit(), VolumeUnit::Gallons);
        assert_eq!(store.state(), LoadState::Ready);

        let fresh = store_on(&backend);
        fresh.activate().await;
        assert_eq!(fresh.unit(), VolumeUnit::Liters);
    }

    #[tokio::test]
    async fn test_read_failure_keeps_default() {
        let backend = Arc::new(MemBackend::new());
        backend.insert_raw(PREFERRED_VOLUME_UNIT_KEY, "Gal");
        backend.set_simulate_read_error(true);
        let store = store_on(&backend);
        store.activate().await;
        assert_eq!(store.unit(), VolumeUnit::Liters);
        assert_eq!(store.state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn test_save_is_visible_before_write_confirms() {
        let backend = Arc::new(MemBackend::new());
        backend.set_simulate_write_error(true);
        let store = store_on(&backend);
        store.activate().await;
        let rx = store.subscribe();

        store.save(VolumeUnit::Gallons);
        assert_eq!(store.unit(), VolumeUnit::Gallons);
        assert!(rx.has_changed().unwrap());

        store.settle().await;
        // The write failed, the in-memory value stands
        assert_eq!(store.unit(), VolumeUnit::Gallons);
        assert_eq!(backend.raw(PREFERRED_VOLUME_UNIT_KEY), None);
    }

    #[tokio::test]
    async fn test_reactivation_with_pending_save_keeps_unit() {
        let backend = Arc::new(MemBackend::new());
        let store = store_on(&backend);
        store.activate().await;
        store.save(VolumeUnit::Liters);
        store.settle().await;

        // No settle: the write for Gal may still be in flight
        store.save(VolumeUnit::Gallons);
        store.activate().await;
        assert_eq!(store.unit(), VolumeUnit::Gallons);
        assert_eq!(
            backend.raw(PREFERRED_VOLUME_UNIT_KEY),
            Some("Gal".to_string())
        );
    }

    #[test]
    fn test_save_from_a_thread_outside_the_runtime() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();
        let backend = Arc::new(MemBackend::new());
        let store = store_on(&backend);
        runtime.block_on(store.activate());

        store.save(VolumeUnit::Gallons);
        runtime.block_on(store.settle());

        assert_eq!(
            backend.raw(PREFERRED_VOLUME_UNIT_KEY),
            Some("Gal".to_string())
        );
    }
}
