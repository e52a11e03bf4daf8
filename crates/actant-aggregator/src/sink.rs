//! Report sinks

use crate::error::AggregatorError;
use crate::report::Report;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Destination for a finished report
pub trait ReportSink {
    /// Write the report
    fn write(&self, report: &Report) -> Result<(), AggregatorError>;
}

/// Writes the report as a JSON file, creating parent directories
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileSink {
    /// Sink writing to `path`
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonFileSink {
    fn write(&self, report: &Report) -> Result<(), AggregatorError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        fs::write(&self.path, contents)?;

        info!(path = %self.path.display(), run_id = %report.run_id, "Report written");
        Ok(())
    }
}

/// Read a report back from disk
pub fn read_report(path: &Path) -> Result<Report, AggregatorError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aggregator, RunMetrics};

    #[test]
    fn test_json_sink_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");

        let report = Aggregator::new().finalize().to_report(RunMetrics::new(), 10);
        let sink = JsonFileSink::new(&path, true);
        sink.write(&report).unwrap();

        let back = read_report(&path).unwrap();
        assert_eq!(back.run_id, report.run_id);
        assert_eq!(back.role_heatmap.roles.len(), 6);
        assert!(back.network.nodes.is_empty());
    }
}
