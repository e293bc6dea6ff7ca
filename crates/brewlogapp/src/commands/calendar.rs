use crate::calendar::{marked_dates, stages_on};
use crate::commands::helpers::ensure_ready;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::batch_store::BatchStore;
use crate::validation::parse_date;

/// Stages across all batches on one day.
pub fn on_date(store: &BatchStore, date: &str) -> Result<CmdResult> {
    let date = parse_date(date)?;
    ensure_ready(store)?;

    let mut result = CmdResult::default();
    result.calendar = stages_on(&store.batches(), date);
    if result.calendar.is_empty() {
        result.add_message(CmdMessage::info(format!("No stages on {}.", date)));
    }
    Ok(result)
}

/// Days that have at least one stage.
pub fn marked(store: &BatchStore) -> Result<CmdResult> {
    ensure_ready(store)?;
    let mut result = CmdResult::default();
    result.marked_dates = marked_dates(&store.batches()).into_iter().collect();
    if result.marked_dates.is_empty() {
        result.add_message(CmdMessage::info("No stages scheduled."));
    }
    Ok(result)
}
