//! # Batch Store
//!
//! The single owner of the batch collection. Views never hold the collection
//! itself; they read snapshots, subscribe for changes, and send edited copies back
//! through [`BatchStore::update`], [`BatchStore::create`] or [`BatchStore::delete`].
//!
//! ## Snapshots
//!
//! State is published through a `tokio::sync::watch` channel. A [`BatchSnapshot`]
//! is cheap to clone (the collection sits behind an `Arc`) and is internally
//! consistent at every observation point: each mutation is one synchronous
//! transform of the current collection.
//!
//! ## Mutation Pipeline
//!
//! ```text
//! validate input ──► transform snapshot (sync) ──► publish ──► persist whole collection (spawned)
//! ```
//!
//! - Mutations issued before the first load resolves fail with
//!   [`BrewlogError::NotReady`]: there is no authoritative collection yet, and
//!   writing one would clobber whatever the backend holds.
//! - Unknown batch or stage ids are no-ops, reported as `false`/`None`, and do not
//!   write.
//! - A reload first waits for this store's pending writes, so it reads back its
//!   own mutations. A mutation made while the reload is in flight is kept: the
//!   in-memory snapshot is already on its way to the backend.
//! - When activations overlap, only the latest load publishes its result.
//! - Stored data with repeated batch ids, or repeated stage ids within a batch,
//!   keeps the first occurrence.

use super::writer::WriteTracker;
use super::{KvBackend, LoadState, BATCHES_KEY};
use crate::error::{BrewlogError, Result};
use crate::model::{Batch, Stage};
use crate::validation::{check_quantity, optional_text, parse_date, require_text};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default)]
pub struct BatchSnapshot {
    pub state: LoadState,
    /// `None` until the first load resolves.
    pub batches: Option<Arc<Vec<Batch>>>,
    /// Bumped by every effective mutation.
    pub revision: u64,
}

impl BatchSnapshot {
    /// True while the collection should not be treated as authoritative.
    pub fn is_loading(&self) -> bool {
        self.state != LoadState::Ready
    }

    pub fn batches(&self) -> &[Batch] {
        self.batches.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, id: &str) -> Option<&Batch> {
        self.batches().iter().find(|b| b.id == id)
    }
}

pub struct BatchStore {
    state: watch::Sender<BatchSnapshot>,
    writes: WriteTracker,
    /// Generation of the most recently started load.
    loads: AtomicU64,
}

impl BatchStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        let (state, _) = watch::channel(BatchSnapshot::default());
        Self {
            state,
            writes: WriteTracker::new(backend),
            loads: AtomicU64::new(0),
        }
    }

    // --- Lifecycle ---

    /// Activation event: a view started observing the store. Always reloads.
    pub async fn activate(&self) {
        self.state.send_modify(|s| s.state = LoadState::Loading);
        tracing::debug!("batch store loading");
        self.load().await;
    }

    /// Reads the collection from the backend. Never fails: missing, unreadable or
    /// undecodable data resolves to an empty collection.
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
        let loaded = match self.writes.backend().get(BATCHES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Batch>>(&raw) {
                Ok(batches) => drop_duplicates(batches),
                Err(e) => {
                    tracing::warn!("failed to decode stored batches, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to load batches, starting empty: {e}");
                Vec::new()
            }
        };

        let published = self.state.send_if_modified(|s| {
            if self.loads.load(Ordering::SeqCst) != generation {
                return false;
            }
            if s.revision == started_at {
                s.batches = Some(Arc::new(loaded));
            } else {
                tracing::debug!("batches changed during load; keeping in-memory snapshot");
            }
            s.state = LoadState::Ready;
            true
        });
        if published {
            tracing::debug!(count = self.batches().len(), "batch store ready");
        } else {
            tracing::debug!(generation, "load superseded by a newer one");
        }
    }

    /// Waits for background writes started so far.
    pub async fn settle(&self) {
        self.writes.settle().await;
    }

    // --- Reads ---

    pub fn snapshot(&self) -> BatchSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BatchSnapshot> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().state
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// The current collection; empty before the first load.
    pub fn batches(&self) -> Arc<Vec<Batch>> {
        self.state.borrow().batches.clone().unwrap_or_default()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Batch> {
        self.state.borrow().get(id).cloned()
    }

    // --- Mutations ---

    /// Creates and stores a new batch, returning it before the write lands.
    pub fn create(&self, name: &str, quantity: f64, description: Option<&str>) -> Result<Batch> {
        let name = require_text("Batch name", name)?;
        check_quantity(quantity)?;
        let batch = Batch::new(name, quantity, optional_text(description));

        let created = batch.clone();
        self.apply(move |current| {
            let mut next = current.to_vec();
            next.push(batch);
            Ok(Some((next, ())))
        })?;
        tracing::debug!(id = %created.id, "batch created");
        Ok(created)
    }

    /// Replaces the stored batch with the same id. Returns `false` if there is none.
    pub fn update(&self, batch: Batch) -> Result<bool> {
        batch.validate()?;
        let replaced = self.apply(move |current| {
            let Some(pos) = current.iter().position(|b| b.id == batch.id) else {
                return Ok(None);
            };
            let mut next = current.to_vec();
            next[pos] = batch;
            Ok(Some((next, ())))
        })?;
        Ok(replaced.is_some())
    }

    /// Removes a batch and its stages. Returns `false` if it did not exist.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.apply(|current| {
            if !current.iter().any(|b| b.id == id) {
                return Ok(None);
            }
            let next: Vec<Batch> = current.iter().filter(|b| b.id != id).cloned().collect();
            Ok(Some((next, ())))
        })?;
        Ok(removed.is_some())
    }

    /// Appends a new stage to a batch. Returns `None` if the batch does not exist.
    pub fn add_stage(&self, batch_id: &str, description: &str, date: &str) -> Result<Option<Stage>> {
        let description = require_text("Stage description", description)?;
        let date = parse_date(date)?;

        self.apply(|current| {
            let Some(pos) = current.iter().position(|b| b.id == batch_id) else {
                return Ok(None);
            };
            let stage = Stage::new(current[pos].next_stage_id(), description, date);
            let mut next = current.to_vec();
            next[pos] = current[pos].with_stage(stage.clone());
            Ok(Some((next, stage)))
        })
    }

    /// Removes one stage from a batch. Returns `false` if either id is unknown.
    pub fn remove_stage(&self, batch_id: &str, stage_id: u64) -> Result<bool> {
        let removed = self.apply(|current| {
            let Some(pos) = current.iter().position(|b| b.id == batch_id) else {
                return Ok(None);
            };
            if current[pos].stage(stage_id).is_none() {
                return Ok(None);
            }
            let mut next = current.to_vec();
            next[pos] = current[pos].without_stage(stage_id);
            Ok(Some((next, ())))
        })?;
        Ok(removed.is_some())
    }

    /// Runs `transform` against the current collection and, if it produced a new
    /// one, publishes it and starts persisting it.
    ///
    /// `transform` returns `Ok(None)` for a no-op.
    fn apply<T>(
        &self,
        transform: impl FnOnce(&[Batch]) -> Result<Option<(Vec<Batch>, T)>>,
    ) -> Result<Option<T>> {
        let mut outcome = Ok(None);
        let mut to_persist = None;

        self.state.send_if_modified(|snapshot| {
            let Some(current) = snapshot.batches.as_ref() else {
                outcome = Err(BrewlogError::NotReady);
                return false;
            };
            match transform(current) {
                Ok(Some((next, value))) => {
                    let next = Arc::new(next);
                    snapshot.batches = Some(Arc::clone(&next));
                    snapshot.revision += 1;
                    to_persist = Some(next);
                    outcome = Ok(Some(value));
                    true
                }
                Ok(None) => false,
                Err(e) => {
                    outcome = Err(e);
                    false
                }
            }
        });

        if let Some(batches) = to_persist {
            self.persist(&batches);
        }
        outcome
    }

    fn persist(&self, batches: &[Batch]) {
        match serde_json::to_string(batches) {
            Ok(encoded) => self.writes.persist(BATCHES_KEY, encoded),
            Err(e) => tracing::warn!("failed to encode batches, write dropped: {e}"),
        }
    }
}

/// Keeps the first batch for each id and the first stage for each id within a batch.
fn drop_duplicates(batches: Vec<Batch>) -> Vec<Batch> {
    let mut seen = HashSet::new();
    let mut dropped = 0usize;
    let kept: Vec<Batch> = batches
        .into_iter()
        .filter_map(|mut batch| {
            if !seen.insert(batch.id.clone()) {
                dropped += 1;
                return None;
            }
            let mut stage_ids = HashSet::new();
            let before = batch.stages.len();
            batch.stages.retain(|stage| stage_ids.insert(stage.id));
            dropped += before - batch.stages.len();
            Some(batch)
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(dropped, "ignoring stored batches or stages with repeated ids");
    }
    kept
}
