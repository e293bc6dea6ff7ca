//! # Context Initialization
//!
//! Wires configuration, the data directory, the filesystem backend and the API
//! into a [`BrewlogContext`].
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit override (the CLI's `--data`)
//! 2. `data_dir` from config, or `BREWLOG_DATA_DIR`
//! 3. The OS data directory (via the `directories` crate)
//!
//! The directory is created lazily by the first write.

use crate::api::BrewlogApi;
use crate::config::{BrewlogConfig, CONFIG_FILE_NAME};
use crate::error::{BrewlogError, Result};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;

pub struct BrewlogContext {
    pub api: BrewlogApi,
    pub config: BrewlogConfig,
    pub data_dir: PathBuf,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "brewlog", "brewlog")
        .ok_or_else(|| BrewlogError::Config("could not determine a home directory".to_string()))
}

/// Location of `brewlog.toml`.
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

/// Resolves the data directory. Only touches the OS directories when neither
/// the override nor the config names one.
pub fn resolve_data_dir(data_override: Option<PathBuf>, config: &BrewlogConfig) -> Result<PathBuf> {
    match data_override.or_else(|| config.data_dir.clone()) {
        Some(dir) => Ok(dir),
        None => Ok(project_dirs()?.data_dir().to_path_buf()),
    }
}

/// Builds the context from an already-loaded config.
pub fn initialize(config: BrewlogConfig, data_override: Option<PathBuf>) -> Result<BrewlogContext> {
    let data_dir = resolve_data_dir(data_override, &config)?;
    tracing::debug!(data_dir = %data_dir.display(), "initializing brewlog");

    let backend = Arc::new(FsBackend::new(data_dir.clone()));
    let api = BrewlogApi::new(backend, config.default_unit());
    Ok(BrewlogContext {
        api,
        config,
        data_dir,
    })
}
