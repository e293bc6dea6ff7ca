//! Input validation for user-supplied batch and stage fields.
//!
//! Everything typed by a user passes through here before it reaches a store:
//! - Text fields are trimmed and must not be empty
//! - Quantities must parse as a finite, positive decimal
//! - Dates must be calendar days in `YYYY-MM-DD` form
//!
//! Failures are reported as [`BrewlogError::Validation`] carrying a message
//! that can be shown to the user verbatim.

use crate::error::{BrewlogError, Result};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trims `value` and rejects it if nothing is left.
///
/// # Examples
/// ```
/// use brewlogapp::validation::require_text;
///
/// assert_eq!(require_text("Name", "  IPA #1 ").unwrap(), "IPA #1");
/// assert!(require_text("Name", "   ").is_err());
/// ```
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BrewlogError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Parses a quantity as entered in a form field.
pub fn parse_quantity(value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BrewlogError::validation("Quantity cannot be empty"));
    }
    let quantity: f64 = trimmed.parse().map_err(|_| {
        BrewlogError::validation(format!("Quantity must be a number, got '{}'", trimmed))
    })?;
    check_quantity(quantity)?;
    Ok(quantity)
}

/// Rejects NaN, infinities, zero and negative quantities.
pub fn check_quantity(quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(BrewlogError::validation(format!(
            "Quantity must be a positive number, got {}",
            quantity
        )));
    }
    Ok(())
}

/// Parses a calendar day.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BrewlogError::validation("Date cannot be empty"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        BrewlogError::validation(format!("Date must look like YYYY-MM-DD, got '{}'", trimmed))
    })
}

/// Normalizes an optional free-text field: blank input means "no value".
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
