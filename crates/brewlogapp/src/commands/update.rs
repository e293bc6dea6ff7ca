use crate::commands::helpers::{ensure_ready, resolve_batch};
use crate::commands::{BatchEdit, CmdMessage, CmdResult};
use crate::error::{BrewlogError, Result};
use crate::store::batch_store::BatchStore;
use crate::validation::{optional_text, parse_quantity, require_text};

/// Applies `edit` to the selected batch. Identity, creation date and stages are kept.
pub fn run(store: &BatchStore, selector: &str, edit: &BatchEdit) -> Result<CmdResult> {
    ensure_ready(store)?;
    if edit.is_empty() {
        return Err(BrewlogError::validation(
            "Nothing to change: give a new name, quantity or description",
        ));
    }

    let mut result = CmdResult::default();
    let Some(current) = resolve_batch(&store.batches(), selector) else {
        result.add_message(CmdMessage::warning(format!(
            "No batch matches '{}', nothing changed",
            selector
        )));
        return Ok(result);
    };

    let name = match &edit.name {
        Some(name) => require_text("Batch name", name)?,
        None => current.name.clone(),
    };
    let quantity = match &edit.quantity {
        Some(quantity) => parse_quantity(quantity)?,
        None => current.quantity,
    };
    let description = match &edit.description {
        Some(description) => optional_text(Some(description)),
        None => current.description.clone(),
    };

    let edited = current.edited(name, quantity, description);
    if store.update(edited.clone())? {
        result.add_message(CmdMessage::success(format!("Batch updated: {}", edited.name)));
        result.batches.push(edited);
    } else {
        // Deleted between resolution and update
        result.add_message(CmdMessage::warning(format!(
            "Batch {} no longer exists, nothing changed",
            current.id
        )));
    }
    Ok(result)
}
