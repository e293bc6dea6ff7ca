use crate::commands::helpers::{ensure_ready, resolve_batch};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::batch_store::BatchStore;

/// All batches, in creation order.
pub fn list(store: &BatchStore) -> Result<CmdResult> {
    ensure_ready(store)?;
    let batches = store.batches().to_vec();

    let mut result = CmdResult::default();
    if batches.is_empty() {
        result.add_message(CmdMessage::info("No batches yet."));
    }
    Ok(result.with_batches(batches))
}

/// One batch with its stages.
pub fn show(store: &BatchStore, selector: &str) -> Result<CmdResult> {
    ensure_ready(store)?;
    let mut result = CmdResult::default();
    match resolve_batch(&store.batches(), selector) {
        Some(batch) => {
            if batch.stages.is_empty() {
                result.add_message(CmdMessage::info("No stages added yet."));
            }
            result.batches.push(batch);
        }
        None => result.add_message(CmdMessage::warning(format!(
            "No batch matches '{}'",
            selector
        ))),
    }
    Ok(result)
}
