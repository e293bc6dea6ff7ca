//! # Storage Layer
//!
//! brewlog keeps its state in an opaque key-value backend and holds the working
//! copy in memory. Two things live here:
//!
//! 1. **Backends** ([`KvBackend`]): raw async `get`/`set` of string values by key.
//! 2. **Stores**: the in-memory owners of domain state that load from and persist
//!    to a backend.
//!
//! ## Keys
//!
//! Each logical collection occupies exactly one key:
//!
//! | Key | Value |
//! |-----|-------|
//! | `batches` | JSON array of batches |
//! | `preferred_volume_unit` | the literal token `L` or `Gal` |
//!
//! ## Load/Save Discipline
//!
//! Both stores follow the same contract:
//!
//! - **Activation** (a view starting to observe the store) moves the store to
//!   [`LoadState::Loading`] and re-reads the backend. Resolution, successful or
//!   not, moves it to [`LoadState::Ready`].
//! - **Read failures** are logged and resolve to an empty/default value. They are
//!   never returned to callers.
//! - **Mutations** apply synchronously to the in-memory snapshot, then write the
//!   *entire* value back in the background. Overlapping writes of the same key
//!   resolve to the most recent snapshot (see [`writer`]). A single process is
//!   assumed to be the only writer.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key in a data directory.
//! - [`mem_backend::MemBackend`]: in-memory, with failure injection for tests.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod batch_store;
pub mod fs_backend;
pub mod mem_backend;
pub mod preference_store;
pub mod writer;

pub const BATCHES_KEY: &str = "batches";
pub const PREFERRED_VOLUME_UNIT_KEY: &str = "preferred_volume_unit";

/// Abstract interface for raw key-value I/O.
///
/// Implementations decide *where* values live; the stores decide *what* goes in them.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the value for `key`. Returns `Ok(None)` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl<T> KvBackend for Arc<T>
where
    T: KvBackend + ?Sized,
{
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}

/// Lifecycle of a store instance.
///
/// While `Loading`, the snapshot is not authoritative: views should show a
/// loading indicator rather than "no data".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
}
