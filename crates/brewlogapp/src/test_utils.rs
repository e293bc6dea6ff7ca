use crate::model::VolumeUnit;
use crate::store::batch_store::BatchStore;
use crate::store::mem_backend::MemBackend;
use crate::store::preference_store::PreferenceStore;
use std::sync::Arc;

/// Both stores over one in-memory backend, already activated.
pub async fn ready_stores() -> (Arc<MemBackend>, BatchStore, PreferenceStore) {
    let backend = Arc::new(MemBackend::new());
    let batches = BatchStore::new(backend.clone());
    let prefs = PreferenceStore::new(backend.clone(), VolumeUnit::default());
    batches.activate().await;
    prefs.activate().await;
    (backend, batches, prefs)
}
