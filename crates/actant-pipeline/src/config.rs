//! Configuration for a pipeline run

use crate::error::PipelineError;
use actant_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Worker pool and corpus settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Documents analyzed concurrently
    /// Default: number of available CPUs
    #[serde(default = "default_max_concurrent_documents")]
    pub max_concurrent_documents: usize,

    /// Documents whose cleaned text is not longer than this (in chars) are skipped
    /// Default: 100
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,

    /// Optional `country_mapping.json` (file-name prefix -> country)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_mapping: Option<PathBuf>,

    /// Rows per entity type in the report's top-N view
    /// Default: 20
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Relations kept verbatim in the report
    /// Default: 50
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Abort at startup when a corpus language has no recognizer coverage
    /// Default: true
    #[serde(default = "default_true")]
    pub strict_coverage: bool,
}

/// Where the report goes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Report file
    /// Default: actant_report.json
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Pretty-print the JSON
    /// Default: true
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_max_concurrent_documents() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
}

fn default_min_text_length() -> usize {
    100
}

fn default_top_n() -> usize {
    20
}

fn default_sample_limit() -> usize {
    actant_aggregator::DEFAULT_SAMPLE_LIMIT
}

fn default_output_path() -> PathBuf {
    PathBuf::from("actant_report.json")
}

fn default_true() -> bool {
    true
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_concurrent_documents: default_max_concurrent_documents(),
            min_text_length: default_min_text_length(),
            country_mapping: None,
            top_n: default_top_n(),
            sample_limit: default_sample_limit(),
            strict_coverage: true,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            pretty: true,
        }
    }
}

/// Full configuration file: `[extractor]`, `[pipeline]` and `[output]`
///
/// # Examples
///
/// ```
/// use actant_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::from_toml(
///     r#"
///     [extractor]
///     proximity_window = 80
///
///     [pipeline]
///     min_text_length = 50
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.extractor.proximity_window, 80);
/// assert_eq!(config.pipeline.min_text_length, 50);
/// assert_eq!(config.pipeline.top_n, 20);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Recognition, lexicon and role assignment settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Worker pool and corpus settings
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Report destination
    #[serde(default)]
    pub output: OutputSettings,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.extractor.validate().map_err(PipelineError::Config)?;
        if self.pipeline.max_concurrent_documents == 0 {
            return Err(PipelineError::Config(
                "max_concurrent_documents must be greater than 0".to_string(),
            ));
        }
        if self.pipeline.top_n == 0 {
            return Err(PipelineError::Config("top_n must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Parse from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self).map_err(|e| PipelineError::Config(format!("Failed to serialize to TOML: {}", e)))
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipeline.min_text_length, 100);
        assert_eq!(config.pipeline.top_n, 20);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config.extractor.proximity_window, 120);
        assert!(config.pipeline.strict_coverage);
        assert_eq!(config.output.path, PathBuf::from("actant_report.json"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = PipelineConfig::default();
        config.pipeline.max_concurrent_documents = 0;
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_invalid_extractor_section_rejected() {
        let config = PipelineConfig::from_toml(
            r#"
            [extractor]
            min_confidence = 3.0
            "#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = PipelineConfig::default();
        config.pipeline.top_n = 5;
        config.extractor.gazetteers.insert("Project".to_string(), vec!["Mombasa Port".to_string()]);
        config.save(&path).unwrap();

        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded.pipeline.top_n, 5);
        assert_eq!(loaded.extractor.gazetteers["Project"], vec!["Mombasa Port".to_string()]);
    }
}
