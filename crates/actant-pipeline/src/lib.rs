//! Actant Pipeline
//!
//! Runs a whole corpus through the analyzer and the aggregator.
//!
//! # Overview
//!
//! 1. **Load**: crawler `.txt` files (eight `key: value` metadata lines,
//!    then the body) and `.jsonl` batches are read in path order, cleaned
//!    and filtered by length. Countries come from metadata, a
//!    `country_mapping.json` prefix table or file-name keywords.
//! 2. **Check coverage**: every language present in the corpus must have a
//!    model or a gazetteer, otherwise the run stops before any work.
//! 3. **Analyze**: a bounded pool of blocking workers analyzes documents in
//!    parallel. A failing or panicking document is logged with its id and
//!    skipped.
//! 4. **Aggregate**: results flow back to the one task that owns the
//!    [`actant_aggregator::Aggregator`] and are applied in input order.
//!
//! # Example Usage
//!
//! ```no_run
//! use actant_pipeline::{Pipeline, PipelineConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::load(Path::new("actant.toml"))?;
//!     let pipeline = Pipeline::new(config)?;
//!
//!     let outcome = pipeline.run_dir(Path::new("corpus")).await?;
//!     let report = pipeline.write_report(&outcome)?;
//!     println!("run {} processed {} documents", report.run_id, outcome.metrics.documents_processed);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod corpus;
mod coverage;
mod error;
mod pipeline;

pub use config::{OutputSettings, PipelineConfig, PipelineSettings};
pub use corpus::{
    clean_text, document_id_for, CorpusLoader, CountryResolver, JsonlBatch, LoadOutcome, LoadedCorpus, METADATA_LINES,
};
pub use coverage::{check_coverage, corpus_languages};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineOutcome};
