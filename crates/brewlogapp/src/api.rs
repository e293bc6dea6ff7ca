//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for view
//! layers. It owns the two stores, dispatches to `commands::*`, and returns
//! structured [`CmdResult`]s.
//!
//! The facade does no I/O of its own and holds no business logic. View layers
//! that re-render on change reach the stores through [`BrewlogApi::batch_store`]
//! and [`BrewlogApi::preference_store`] and subscribe to them.
//!
//! ## Lifecycle
//!
//! 1. [`BrewlogApi::activate`] loads both stores (the activation event)
//! 2. Commands mutate in memory and persist in the background
//! 3. [`BrewlogApi::settle`] waits for outstanding writes before shutdown

use crate::calendar::CalendarView;
use crate::commands::{self, BatchEdit, CmdResult};
use crate::error::Result;
use crate::model::VolumeUnit;
use crate::store::batch_store::BatchStore;
use crate::store::preference_store::PreferenceStore;
use crate::store::KvBackend;
use std::sync::Arc;

pub struct BrewlogApi {
    batches: Arc<BatchStore>,
    prefs: Arc<PreferenceStore>,
}

impl BrewlogApi {
    pub fn new(backend: Arc<dyn KvBackend>, default_unit: VolumeUnit) -> Self {
        Self {
            batches: Arc::new(BatchStore::new(backend.clone())),
            prefs: Arc::new(PreferenceStore::new(backend, default_unit)),
        }
    }

    pub async fn activate(&self) {
        tokio::join!(self.batches.activate(), self.prefs.activate());
    }

    pub async fn settle(&self) {
        tokio::join!(self.batches.settle(), self.prefs.settle());
    }

    pub fn batch_store(&self) -> &Arc<BatchStore> {
        &self.batches
    }

    pub fn preference_store(&self) -> &Arc<PreferenceStore> {
        &self.prefs
    }

    pub fn calendar_view(&self) -> CalendarView {
        CalendarView::new(&self.batches)
    }

    pub fn list_batches(&self) -> Result<CmdResult> {
        commands::get::list(&self.batches)
    }

    pub fn show_batch(&self, selector: &str) -> Result<CmdResult> {
        commands::get::show(&self.batches, selector)
    }

    pub fn create_batch(
        &self,
        name: &str,
        quantity: &str,
        description: Option<&str>,
    ) -> Result<CmdResult> {
        commands::create::run(&self.batches, name, quantity, description)
    }

    pub fn edit_batch(&self, selector: &str, edit: &BatchEdit) -> Result<CmdResult> {
        commands::update::run(&self.batches, selector, edit)
    }

    pub fn delete_batch(&self, selector: &str) -> Result<CmdResult> {
        commands::delete::run(&self.batches, selector)
    }

    pub fn add_stage(&self, selector: &str, description: &str, date: &str) -> Result<CmdResult> {
        commands::stages::add(&self.batches, selector, description, date)
    }

    pub fn remove_stage(&self, selector: &str, stage_selector: &str) -> Result<CmdResult> {
        commands::stages::remove(&self.batches, selector, stage_selector)
    }

    pub fn stages_on(&self, date: &str) -> Result<CmdResult> {
        commands::calendar::on_date(&self.batches, date)
    }

    pub fn marked_dates(&self) -> Result<CmdResult> {
        commands::calendar::marked(&self.batches)
    }

    pub fn volume_unit(&self) -> Result<CmdResult> {
        commands::units::get(&self.prefs)
    }

    pub fn set_volume_unit(&self, token: &str) -> Result<CmdResult> {
        commands::units::set(&self.prefs, token)
    }
}
