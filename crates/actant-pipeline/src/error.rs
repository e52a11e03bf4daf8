//! Error types for the Pipeline

use actant_aggregator::AggregatorError;
use actant_extractor::ExtractorError;
use thiserror::Error;

/// Errors that stop a pipeline run
///
/// Failures of individual documents never surface here; they are logged,
/// counted in the run metrics and skipped.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A corpus language has neither a model nor a gazetteer
    #[error("No model or gazetteer covers language '{language}' present in the corpus")]
    CoverageMissing {
        /// The uncovered language tag
        language: String,
    },

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration file
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Unreadable corpus or country mapping
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// The worker pool itself failed
    #[error("Worker error: {0}")]
    Worker(String),

    /// Analyzer construction failed
    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Report emission failed
    #[error("Aggregator error: {0}")]
    Aggregator(#[from] AggregatorError),
}
