use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BrewlogError, Result};
use crate::model::VolumeUnit;
use crate::store::preference_store::PreferenceStore;

pub fn get(prefs: &PreferenceStore) -> Result<CmdResult> {
    Ok(CmdResult::default().with_unit(prefs.unit()))
}

pub fn set(prefs: &PreferenceStore, token: &str) -> Result<CmdResult> {
    let unit = VolumeUnit::from_token(token.trim()).ok_or_else(|| {
        BrewlogError::validation(format!(
            "Unknown volume unit '{}', expected one of: {}",
            token.trim(),
            VolumeUnit::ALL.map(VolumeUnit::token).join(", ")
        ))
    })?;
    prefs.save(unit);

    let mut result = CmdResult::default().with_unit(unit);
    result.add_message(CmdMessage::success(format!(
        "Preferred volume unit set to {} ({})",
        unit.label(),
        unit
    )));
    Ok(result)
}
