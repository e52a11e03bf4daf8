//! Actant Aggregator
//!
//! Accumulates per-document analyses into corpus-wide statistics and the
//! actant network, then exposes them as read-only report views.
//!
//! # Overview
//!
//! - **AggregatedModel**: entity frequencies, action distributions, the
//!   country × role heatmap, the action × entity co-occurrence matrix and
//!   the network. Every table is additive, so models built from disjoint
//!   document sets merge to the same result in any order.
//! - **Aggregator**: the single writer. Applies one document at a time or
//!   absorbs partial models from workers.
//! - **FinalizedModel / Report**: query views and the serializable report
//!   handed to a [`ReportSink`].
//!
//! Duplicate documents are not detected: ingesting the same analysis twice
//! counts it twice.
//!
//! # Example Usage
//!
//! ```no_run
//! use actant_aggregator::{Aggregator, JsonFileSink, ReportSink, RunMetrics};
//! # use actant_domain::DocumentAnalysis;
//!
//! # fn example(analyses: Vec<DocumentAnalysis>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut aggregator = Aggregator::new();
//! for analysis in &analyses {
//!     aggregator.apply(analysis);
//! }
//!
//! let report = aggregator.finalize().to_report(RunMetrics::new(), 20);
//! JsonFileSink::new("actant_report.json", true).write(&report)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregator;
mod error;
mod metrics;
mod model;
mod network;
mod report;
mod sink;

pub use aggregator::{Aggregator, DEFAULT_SAMPLE_LIMIT};
pub use error::AggregatorError;
pub use metrics::RunMetrics;
pub use model::{AggregatedModel, EntityStats, RelationSample};
pub use network::{action_node_id, entity_node_id, ActantNetwork, NetworkEdge, NetworkNode};
pub use report::{
    ActionDistribution, CooccurrenceMatrix, EntityFrequency, FinalizedModel, NetworkView, Report,
    RoleHeatmap,
};
pub use sink::{read_report, JsonFileSink, ReportSink};
