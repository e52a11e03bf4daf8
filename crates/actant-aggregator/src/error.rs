//! Error types for the Aggregator

use thiserror::Error;

/// Errors that can occur while emitting aggregated results
///
/// Accumulation itself cannot fail; only handing the finalized report to a
/// sink can.
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// Writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
