use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::batch_store::BatchStore;
use crate::validation::{parse_quantity, require_text};

pub fn run(
    store: &BatchStore,
    name: &str,
    quantity: &str,
    description: Option<&str>,
) -> Result<CmdResult> {
    // Validate everything up front so a bad quantity never hides a bad name
    let name = require_text("Batch name", name)?;
    let quantity = parse_quantity(quantity)?;
    let batch = store.create(&name, quantity, description)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Batch created: {}", batch.name)));
    Ok(result.with_batches(vec![batch]))
}
