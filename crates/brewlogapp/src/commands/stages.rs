use crate::commands::helpers::{ensure_ready, resolve_batch, resolve_stage};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::batch_store::BatchStore;

pub fn add(store: &BatchStore, selector: &str, description: &str, date: &str) -> Result<CmdResult> {
    ensure_ready(store)?;
    let mut result = CmdResult::default();
    let Some(batch) = resolve_batch(&store.batches(), selector) else {
        result.add_message(CmdMessage::warning(format!(
            "No batch matches '{}', no stage added",
            selector
        )));
        return Ok(result);
    };

    match store.add_stage(&batch.id, description, date)? {
        Some(stage) => {
            result.add_message(CmdMessage::success(format!(
                "Stage added to {}: {} on {}",
                batch.name, stage.description, stage.date
            )));
            result.stages.push(stage);
            result.batches.extend(store.get_by_id(&batch.id));
        }
        None => result.add_message(CmdMessage::warning(format!(
            "Batch {} no longer exists, no stage added",
            batch.id
        ))),
    }
    Ok(result)
}

pub fn remove(store: &BatchStore, selector: &str, stage_selector: &str) -> Result<CmdResult> {
    ensure_ready(store)?;
    let mut result = CmdResult::default();
    let Some(batch) = resolve_batch(&store.batches(), selector) else {
        result.add_message(CmdMessage::warning(format!(
            "No batch matches '{}', nothing removed",
            selector
        )));
        return Ok(result);
    };
    let Some(stage) = resolve_stage(&batch, stage_selector).cloned() else {
        result.add_message(CmdMessage::warning(format!(
            "Batch {} has no stage '{}', nothing removed",
            batch.name, stage_selector
        )));
        return Ok(result);
    };

    if store.remove_stage(&batch.id, stage.id)? {
        result.add_message(CmdMessage::success(format!(
            "Stage removed from {}: {}",
            batch.name, stage.description
        )));
        result.stages.push(stage);
        result.batches.extend(store.get_by_id(&batch.id));
    }
    Ok(result)
}
