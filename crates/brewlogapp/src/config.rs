//! # Configuration
//!
//! Brewlog configuration is loaded with [`confique`] from two layers, in
//! priority order:
//!
//! 1. **Environment variables**: `BREWLOG_DATA_DIR`, `BREWLOG_LOG`
//! 2. **Config file**: `brewlog.toml` in the OS config directory (via the
//!    `directories` crate)
//! 3. **Compiled defaults**
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where the key-value files live |
//! | `default_unit` | `L` | Volume unit used until one is saved (`L` or `Gal`) |
//! | `log_filter` | `warn` | `tracing` filter directive for the CLI |

use crate::error::{BrewlogError, Result};
use crate::model::VolumeUnit;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "brewlog.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BrewlogConfig {
    /// Directory holding the stored batches and preferences.
    #[config(env = "BREWLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Volume unit shown before any preference has been saved.
    #[config(default = "L")]
    pub default_unit: String,

    /// Log filter, e.g. "warn" or "brewlogapp=debug".
    #[config(default = "warn", env = "BREWLOG_LOG")]
    pub log_filter: String,
}

impl Default for BrewlogConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_unit: VolumeUnit::Liters.token().to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl BrewlogConfig {
    /// Loads env overrides on top of `path` (if it exists) on top of defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(path)
            .load()
            .map_err(|e| BrewlogError::Config(e.to_string()))
    }

    /// The configured default unit. Unknown tokens fall back to liters.
    pub fn default_unit(&self) -> VolumeUnit {
        VolumeUnit::from_token(self.default_unit.trim()).unwrap_or_else(|| {
            tracing::warn!(
                unit = %self.default_unit,
                "unknown default_unit in config, using liters"
            );
            VolumeUnit::Liters
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = BrewlogConfig::default();
        assert_eq!(config.data_dir, None);
        assert_eq!(config.default_unit(), VolumeUnit::Liters);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_default_unit_tokens() {
        let config = BrewlogConfig {
            default_unit: "Gal".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_unit(), VolumeUnit::Gallons);

        let config = BrewlogConfig {
            default_unit: "pints".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_unit(), VolumeUnit::Liters);
    }

    #[test]
    fn test_toml_shape() {
        let config: BrewlogConfig = toml::from_str(
            r#"
            data_dir = "/tmp/brew"
            default_unit = "Gal"
            log_filter = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/brew")));
        assert_eq!(config.default_unit(), VolumeUnit::Gallons);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "default_unit = \"Gal\"\n").unwrap();

        let config = BrewlogConfig::load_from(&path).unwrap();
        assert_eq!(config.default_unit(), VolumeUnit::Gallons);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BrewlogConfig::load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.default_unit, "L");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "default_unit = [").unwrap();

        let err = BrewlogConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, BrewlogError::Config(_)));
    }
}
