//! Init-config command implementation.

use crate::cli::InitConfigArgs;
use crate::config::default_config_path;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use actant_pipeline::PipelineConfig;
use std::path::PathBuf;

/// Write the configuration file and return its path.
pub fn write_config(args: &InitConfigArgs) -> Result<PathBuf> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    if path.exists() && !args.force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = PipelineConfig {
        extractor: args.preset.into(),
        ..PipelineConfig::default()
    };
    config.save(&path)?;
    Ok(path)
}

/// Execute the init-config command.
pub fn execute_init_config(args: InitConfigArgs, formatter: &Formatter) -> Result<()> {
    let path = write_config(&args)?;
    println!("{}", formatter.success(&format!("Configuration written to {}", path.display())));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PresetArg;

    #[test]
    fn test_write_and_refuse_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitConfigArgs {
            path: Some(dir.path().join("actant").join("config.toml")),
            preset: PresetArg::Aggressive,
            force: false,
        };

        let path = write_config(&args).unwrap();
        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded.extractor.proximity_window, 60);

        assert!(matches!(write_config(&args), Err(CliError::InvalidInput(_))));

        let forced = InitConfigArgs { force: true, ..args };
        assert!(write_config(&forced).is_ok());
    }
}
