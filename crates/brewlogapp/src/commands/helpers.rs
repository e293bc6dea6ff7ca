use crate::error::{BrewlogError, Result};
use crate::model::{Batch, Stage};
use crate::store::batch_store::BatchStore;

/// Shortest id prefix accepted as a selector.
pub const MIN_PREFIX_LEN: usize = 4;

/// Fails with `NotReady` while the store's snapshot is not authoritative.
pub fn ensure_ready(store: &BatchStore) -> Result<()> {
    if store.is_loading() {
        return Err(BrewlogError::NotReady);
    }
    Ok(())
}

/// Finds a batch by selector, in order of precedence:
///
/// 1. Exact id
/// 2. 1-based position in the collection (as printed by `list`)
/// 3. Unique id prefix of at least [`MIN_PREFIX_LEN`] characters
///
/// Returns `None` when nothing (or more than one batch) matches.
pub fn resolve_batch(batches: &[Batch], selector: &str) -> Option<Batch> {
    let selector = selector.trim();
    if selector.is_empty() {
        return None;
    }

    if let Some(batch) = batches.iter().find(|b| b.id == selector) {
        return Some(batch.clone());
    }

    if let Ok(position) = selector.parse::<usize>() {
        if let Some(batch) = position.checked_sub(1).and_then(|i| batches.get(i)) {
            return Some(batch.clone());
        }
    }

    if selector.len() >= MIN_PREFIX_LEN {
        let mut matches = batches.iter().filter(|b| b.id.starts_with(selector));
        if let (Some(batch), None) = (matches.next(), matches.next()) {
            return Some(batch.clone());
        }
    }

    None
}

/// Finds a stage of `batch` by exact id, or by 1-based position.
pub fn resolve_stage<'a>(batch: &'a Batch, selector: &str) -> Option<&'a Stage> {
    let n: u64 = selector.trim().parse().ok()?;
    batch.stage(n).or_else(|| {
        usize::try_from(n)
            .ok()
            .and_then(|p| p.checked_sub(1))
            .and_then(|i| batch.stages.get(i))
    })
}
