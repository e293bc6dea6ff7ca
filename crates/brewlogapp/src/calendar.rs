//! # Calendar Index
//!
//! A projection of the batch collection onto dates. Nothing here is stored:
//! every call walks the current batches, so a renamed batch shows its new name on
//! the next read without any reindexing.
//!
//! The walk is linear in the total number of stages. Collections are personal
//! scale, so there is no date index.
//!
//! Matching is exact calendar-day equality; there are no ranges or time zones.

use crate::model::{Batch, Stage};
use crate::store::batch_store::{BatchSnapshot, BatchStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use tokio::sync::watch;

/// A stage together with the batch it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub stage: Stage,
    pub batch_name: String,
    pub batch_id: String,
}

/// All stages dated `date`, in batch order then stage order.
pub fn stages_on(batches: &[Batch], date: NaiveDate) -> Vec<CalendarEntry> {
    batches
        .iter()
        .flat_map(|batch| {
            batch
                .stages
                .iter()
                .filter(move |stage| stage.date == date)
                .map(move |stage| CalendarEntry {
                    stage: stage.clone(),
                    batch_name: batch.name.clone(),
                    batch_id: batch.id.clone(),
                })
        })
        .collect()
}

/// Every date that has at least one stage.
pub fn marked_dates(batches: &[Batch]) -> BTreeSet<NaiveDate> {
    batches
        .iter()
        .flat_map(|batch| batch.stages.iter().map(|stage| stage.date))
        .collect()
}

/// A calendar screen's state: the selected day plus a live view of the store.
pub struct CalendarView {
    batches: watch::Receiver<BatchSnapshot>,
    selected: Option<NaiveDate>,
}

impl CalendarView {
    pub fn new(store: &BatchStore) -> Self {
        Self {
            batches: store.subscribe(),
            selected: None,
        }
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.batches.borrow().is_loading()
    }

    /// Stages on the selected day, computed from the latest snapshot.
    /// Empty when nothing is selected.
    pub fn entries(&self) -> Vec<CalendarEntry> {
        match self.selected {
            Some(date) => stages_on(self.batches.borrow().batches(), date),
            None => Vec::new(),
        }
    }

    pub fn marked_dates(&self) -> BTreeSet<NaiveDate> {
        marked_dates(self.batches.borrow().batches())
    }

    /// Waits for the store to publish a new snapshot. Returns `false` once the
    /// store is gone.
    pub async fn changed(&mut self) -> bool {
        self.batches.changed().await.is_ok()
    }
}
