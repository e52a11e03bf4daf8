//! Configuration file resolution for the CLI.

use crate::error::{CliError, Result};
use actant_pipeline::PipelineConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration path: `~/.actant/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".actant").join("config.toml"))
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, the default path is used when
/// present, otherwise built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<PipelineConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(CliError::Config(format!("Config file {} not found", path.display())));
        }
        debug!(path = %path.display(), "Loading configuration");
        return Ok(PipelineConfig::load(path)?);
    }

    match default_config_path() {
        Ok(path) if path.exists() => {
            debug!(path = %path.display(), "Loading configuration");
            Ok(PipelineConfig::load(&path)?)
        }
        _ => {
            debug!("No configuration file, using defaults");
            Ok(PipelineConfig::default())
        }
    }
}
