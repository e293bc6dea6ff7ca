//! # Domain Model: Batches and Stages
//!
//! This module defines the core data structures for brewlog: [`Batch`], [`Stage`]
//! and [`VolumeUnit`].
//!
//! ## Ownership
//!
//! A [`Stage`] has no identity outside its parent batch. Stage ids are only unique
//! within one batch, and a stage is never moved between batches. Removing a stage
//! means filtering it out of the parent's `stages`; there is no in-place stage edit.
//!
//! ## Value Semantics
//!
//! Batches are plain values. Every change produces a new `Batch` with the same `id`:
//!
//! - [`Batch::new`]: factory, stamps `id`, `created_at` and an empty stage list
//! - [`Batch::edited`]: replaces the editable fields, keeps identity and stages
//! - [`Batch::with_stage`] / [`Batch::without_stage`]: stage list transforms
//!
//! ## Persisted Shape
//!
//! Batches serialize with camelCase field names, dates as `YYYY-MM-DD`:
//!
//! ```text
//! {
//!   "id": "3f0c…",
//!   "name": "IPA #1",
//!   "quantity": 20.0,
//!   "createdAt": "2024-04-28",
//!   "description": "West coast",
//!   "isFinished": false,
//!   "stages": [{ "id": 1714521600000, "description": "Dry hop", "date": "2024-05-01" }]
//! }
//! ```
//!
//! `description` is omitted when absent. `isFinished` is carried through every
//! transform but no operation manages it.

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::error::{BrewlogError, Result};
use crate::validation::{check_quantity, require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: u64,
    pub description: String,
    pub date: NaiveDate,
}

impl Stage {
    pub fn new(id: u64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            description: description.into(),
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub created_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Batch {
    /// Creates a new, empty batch dated today, with a random UUID id.
    pub fn new(name: impl Into<String>, quantity: f64, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            created_at: Local::now().date_naive(),
            description: description.filter(|d| !d.trim().is_empty()),
            is_finished: false,
            stages: Vec::new(),
        }
    }

    /// Returns a copy with the editable fields replaced.
    pub fn edited(
        &self,
        name: impl Into<String>,
        quantity: f64,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            description: description.filter(|d| !d.trim().is_empty()),
            ..self.clone()
        }
    }

    /// Returns a copy with `stage` appended.
    pub fn with_stage(&self, stage: Stage) -> Self {
        let mut next = self.clone();
        next.stages.push(stage);
        next
    }

    /// Returns a copy without the stage `stage_id`. Unknown ids leave the stages untouched.
    pub fn without_stage(&self, stage_id: u64) -> Self {
        Self {
            stages: self
                .stages
                .iter()
                .filter(|s| s.id != stage_id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn stage(&self, stage_id: u64) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    /// Id for the next stage of this batch.
    ///
    /// Wall-clock milliseconds, bumped past the largest existing id so stages added
    /// within the same millisecond (or after a clock step back) stay unique.
    pub fn next_stage_id(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let floor = self
            .stages
            .iter()
            .map(|s| s.id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        now.max(floor)
    }

    /// Checks the fields a user can edit, and that stage ids are unique.
    pub fn validate(&self) -> Result<()> {
        require_text("Batch name", &self.name)?;
        check_quantity(self.quantity)?;
        let mut seen = HashSet::new();
        if let Some(dup) = self.stages.iter().find(|s| !seen.insert(s.id)) {
            return Err(BrewlogError::validation(format!(
                "Duplicate stage id {} in batch '{}'",
                dup.id, self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[default]
    #[serde(rename = "L")]
    Liters,
    #[serde(rename = "Gal")]
    Gallons,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 2] = [VolumeUnit::Liters, VolumeUnit::Gallons];

    /// Parses a stored token. Anything other than the exact tokens is rejected.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "L" => Some(Self::Liters),
            "Gal" => Some(Self::Gallons),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Liters => "L",
            Self::Gallons => "Gal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Liters => "Liters",
            Self::Gallons => "Gallons",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_batch_defaults() {
        let batch = Batch::new("IPA #1", 20.0, None);
        assert_eq!(batch.name, "IPA #1");
        assert_eq!(batch.quantity, 20.0);
        assert!(batch.stages.is_empty());
        assert!(!batch.is_finished);
        assert_eq!(batch.description, None);
        assert_eq!(batch.created_at, Local::now().date_naive());
    }

    #[test]
    fn test_new_batch_ids_are_unique() {
        let a = Batch::new("A", 1.0, None);
        let b = Batch::new("A", 1.0, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let batch = Batch::new("A", 1.0, Some("  ".into()));
        assert_eq!(batch.description, None);
    }

    #[test]
    fn test_edited_preserves_identity_and_stages() {
        let mut batch = Batch::new("Old", 10.0, Some("first".into()));
        batch.is_finished = true;
        let batch = batch.with_stage(Stage::new(1, "Pitch", date(2024, 5, 1)));

        let edited = batch.edited("New", 12.5, None);
        assert_eq!(edited.id, batch.id);
        assert_eq!(edited.created_at, batch.created_at);
        assert_eq!(edited.stages, batch.stages);
        assert!(edited.is_finished);
        assert_eq!(edited.name, "New");
        assert_eq!(edited.quantity, 12.5);
        assert_eq!(edited.description, None);
    }

    #[test]
    fn test_with_and_without_stage() {
        let batch = Batch::new("A", 1.0, None);
        let stage = Stage::new(42, "Dry hop", date(2024, 5, 1));
        let added = batch.with_stage(stage.clone());
        assert_eq!(added.stages, vec![stage]);
        assert!(batch.stages.is_empty());

        let removed = added.without_stage(42);
        assert_eq!(removed.stages, batch.stages);

        let untouched = added.without_stage(7);
        assert_eq!(untouched.stages, added.stages);
    }

    #[test]
    fn test_next_stage_id_is_unique_within_batch() {
        let far_future = u64::MAX - 10;
        let batch =
            Batch::new("A", 1.0, None).with_stage(Stage::new(far_future, "x", date(2024, 1, 1)));
        assert_eq!(batch.next_stage_id(), far_future + 1);

        let empty = Batch::new("B", 1.0, None);
        assert!(empty.next_stage_id() > 0);
    }

    #[test]
    fn test_validate() {
        assert!(Batch::new("A", 1.0, None).validate().is_ok());
        assert!(Batch::new(" ", 1.0, None).validate().is_err());
        assert!(Batch::new("A", 0.0, None).validate().is_err());
        assert!(Batch::new("A", f64::NAN, None).validate().is_err());

        let dup = Batch::new("A", 1.0, None)
            .with_stage(Stage::new(1, "x", date(2024, 1, 1)))
            .with_stage(Stage::new(1, "y", date(2024, 1, 2)));
        assert!(dup.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_serialized_field_names() {
        let batch = Batch::new("IPA #1", 20.0, Some("hoppy".into()))
            .with_stage(Stage::new(7, "Dry hop", date(2024, 5, 1)));
        let value = serde_json::to_value(&batch).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "name",
            "quantity",
            "createdAt",
            "description",
            "isFinished",
            "stages",
        ] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(value["stages"][0]["date"], "2024-05-01");
        assert_eq!(value["stages"][0]["id"], 7);
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"id":"Tue Apr 30 2024","name":"Cider","quantity":5,"createdAt":"2024-04-30"}"#;
        let batch: Batch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.id, "Tue Apr 30 2024");
        assert_eq!(batch.quantity, 5.0);
        assert!(!batch.is_finished);
        assert!(batch.stages.is_empty());
        assert_eq!(batch.description, None);
    }

    #[test]
    fn test_volume_unit_tokens() {
        assert_eq!(VolumeUnit::from_token("L"), Some(VolumeUnit::Liters));
        assert_eq!(VolumeUnit::from_token("Gal"), Some(VolumeUnit::Gallons));
        assert_eq!(VolumeUnit::from_token("gal"), None);
        assert_eq!(VolumeUnit::from_token(""), None);
        assert_eq!(VolumeUnit::default(), VolumeUnit::Liters);
        assert_eq!(VolumeUnit::Gallons.to_string(), "Gal");
        assert_eq!(
            serde_json::to_string(&VolumeUnit::Gallons).unwrap(),
            "\"Gal\""
        );
    }
}
