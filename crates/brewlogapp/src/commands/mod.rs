//! # Command Layer
//!
//! The business operations of brewlog, one submodule per command. Commands take
//! the stores and plain Rust values, and return a structured [`CmdResult`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr or terminal concerns
//! - **Argument parsing**: that's the view layer's job
//! - **Loading**: the caller activates the stores first
//!
//! ## Error Model
//!
//! - Bad input (blank names, non-numeric quantities, malformed dates) is returned
//!   as [`BrewlogError::Validation`](crate::error::BrewlogError::Validation) before
//!   anything is mutated.
//! - Unknown batches or stages are not errors. The command does nothing and says
//!   so with a warning message.
//! - Storage failures never show up here; the stores absorb and log them.
//!
//! ## Selectors
//!
//! Commands address batches by selector (see [`helpers::resolve_batch`]): the
//! full id, the 1-based position shown by `list`, or a unique id prefix.
//!
//! ## Command Modules
//!
//! - [`create`]: Create a batch
//! - [`update`]: Edit a batch's name, quantity or description
//! - [`delete`]: Delete a batch
//! - [`get`]: List batches or show one
//! - [`stages`]: Add and remove stages
//! - [`calendar`]: Stages on a day, and the days that have stages
//! - [`units`]: Read and set the preferred volume unit
//! - [`helpers`]: Selector resolution and readiness checks

use crate::calendar::CalendarEntry;
use crate::model::{Batch, Stage, VolumeUnit};
use chrono::NaiveDate;
use serde::Serialize;

pub mod calendar;
pub mod create;
pub mod delete;
pub mod get;
pub mod helpers;
pub mod stages;
pub mod units;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Batches created, changed, listed or shown.
    pub batches: Vec<Batch>,
    /// Stages added or removed.
    pub stages: Vec<Stage>,
    pub calendar: Vec<CalendarEntry>,
    pub marked_dates: Vec<NaiveDate>,
    pub unit: Option<VolumeUnit>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_batches(mut self, batches: Vec<Batch>) -> Self {
        self.batches = batches;
        self
    }

    pub fn with_unit(mut self, unit: VolumeUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

/// Requested changes to a batch. `None` keeps the current value; an empty
/// description clears it.
#[derive(Debug, Clone, Default)]
pub struct BatchEdit {
    pub name: Option<String>,
    pub quantity: Option<String>,
    pub description: Option<String>,
}

impl BatchEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.description.is_none()
    }
}
