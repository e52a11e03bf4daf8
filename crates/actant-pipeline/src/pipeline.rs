//! Bounded worker pool feeding the single-writer aggregator

use crate::config::PipelineConfig;
use crate::corpus::{CorpusLoader, CountryResolver, LoadedCorpus};
use crate::coverage::check_coverage;
use crate::error::PipelineError;
use actant_aggregator::{Aggregator, FinalizedModel, JsonFileSink, Report, ReportSink, RunMetrics};
use actant_domain::{Document, DocumentAnalysis, DocumentId};
use actant_extractor::{DocumentAnalyzer, ExtractorError};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// What a worker hands back for one document
#[derive(Debug)]
enum WorkerResult {
    Analyzed(DocumentAnalysis),
    Failed { kind: &'static str, message: String },
}

/// Metrics-table key for an analyzer error
fn failure_kind(error: &ExtractorError) -> &'static str {
    match error {
        ExtractorError::RecognitionFailure { .. } => "recognition",
        ExtractorError::Config(_) => "config",
        ExtractorError::InvalidLexicon(_) => "lexicon",
        ExtractorError::Model(_) => "model",
        ExtractorError::Pattern(_) => "pattern",
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Analyze one document, turning errors and panics into a failed result
fn analyze_isolated(analyzer: &DocumentAnalyzer, document: &Document) -> WorkerResult {
    match panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(document))) {
        Ok(Ok(analysis)) => WorkerResult::Analyzed(analysis),
        Ok(Err(e)) => WorkerResult::Failed {
            kind: failure_kind(&e),
            message: e.to_string(),
        },
        Err(payload) => WorkerResult::Failed {
            kind: "panic",
            message: panic_message(payload),
        },
    }
}

/// Releases worker results in document order
///
/// Workers finish in any order; applying in input order keeps the report
/// (including its relation sample) identical across runs.
#[derive(Debug, Default)]
struct ReorderBuffer {
    next: usize,
    pending: BTreeMap<usize, (DocumentId, WorkerResult)>,
}

impl ReorderBuffer {
    fn push(&mut self, index: usize, id: DocumentId, result: WorkerResult) {
        self.pending.insert(index, (id, result));
    }

    fn drain_ready(&mut self) -> Vec<(DocumentId, WorkerResult)> {
        let mut ready = Vec::new();
        while let Some(entry) = self.pending.remove(&self.next) {
            ready.push(entry);
            self.next += 1;
        }
        ready
    }
}

/// Finished run: read-only model plus counters
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Aggregated corpus model
    pub model: FinalizedModel,
    /// Run counters
    pub metrics: RunMetrics,
}

impl PipelineOutcome {
    /// Assemble the serializable report
    pub fn report(&self, top_n: usize) -> Report {
        self.model.to_report(self.metrics.clone(), top_n)
    }
}

/// Corpus pipeline: load, check coverage, analyze in parallel, aggregate
///
/// # Examples
///
/// ```no_run
/// use actant_pipeline::{Pipeline, PipelineConfig};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = Pipeline::new(PipelineConfig::default())?;
/// let outcome = pipeline.run_dir(Path::new("corpus/articles_txt")).await?;
/// println!("{}", outcome.metrics.summary());
/// pipeline.write_report(&outcome)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    analyzer: Arc<DocumentAnalyzer>,
}

impl Pipeline {
    /// Validate the configuration and build the analyzer
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let analyzer = DocumentAnalyzer::new(config.extractor.clone())?;
        Ok(Self::with_analyzer(config, analyzer))
    }

    /// Use a prebuilt analyzer (custom scorer or model provider)
    pub fn with_analyzer(config: PipelineConfig, analyzer: DocumentAnalyzer) -> Self {
        Self {
            config,
            analyzer: Arc::new(analyzer),
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Shared analyzer
    pub fn analyzer(&self) -> &DocumentAnalyzer {
        &self.analyzer
    }

    /// Read a corpus directory with the configured filters and country mapping
    pub fn load_corpus(&self, root: &Path) -> Result<LoadedCorpus, PipelineError> {
        let countries = match &self.config.pipeline.country_mapping {
            Some(path) => CountryResolver::from_file(path)?,
            None => CountryResolver::default(),
        };
        CorpusLoader::new(self.config.pipeline.min_text_length, countries).load_dir(root)
    }

    /// Load a corpus directory and run it
    pub async fn run_dir(&self, root: &Path) -> Result<PipelineOutcome, PipelineError> {
        let started = Instant::now();
        let corpus = self.load_corpus(root)?;

        let mut metrics = RunMetrics::new();
        for _ in 0..corpus.filtered {
            metrics.record_seen();
            metrics.record_filtered();
        }
        for (path, message) in &corpus.failures {
            debug!(path = %path.display(), error = %message, "Corpus input failed to load");
            metrics.record_seen();
            metrics.record_failure("corpus");
        }

        self.execute(corpus.documents, metrics, started).await
    }

    /// Analyze and aggregate already loaded documents
    pub async fn run(&self, documents: Vec<Document>) -> Result<PipelineOutcome, PipelineError> {
        self.execute(documents, RunMetrics::new(), Instant::now()).await
    }

    async fn execute(
        &self,
        documents: Vec<Document>,
        mut metrics: RunMetrics,
        started: Instant,
    ) -> Result<PipelineOutcome, PipelineError> {
        if self.config.pipeline.strict_coverage {
            check_coverage(&self.analyzer, &documents)?;
        }

        let limit = self.config.pipeline.max_concurrent_documents.max(1);
        info!(documents = documents.len(), workers = limit, "Pipeline started");

        let mut aggregator = Aggregator::with_sample_limit(self.config.pipeline.sample_limit);
        let mut tasks: JoinSet<(usize, DocumentId, WorkerResult)> = JoinSet::new();
        let mut reorder = ReorderBuffer::default();
        let mut queue = documents.into_iter().enumerate();

        loop {
            while tasks.len() < limit {
                let Some((index, document)) = queue.next() else {
                    break;
                };
                metrics.record_seen();
                let analyzer = Arc::clone(&self.analyzer);
                tasks.spawn_blocking(move || {
                    let result = analyze_isolated(&analyzer, &document);
                    (index, document.id, result)
                });
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            let (index, id, result) = joined.map_err(|e| PipelineError::Worker(e.to_string()))?;
            reorder.push(index, id, result);

            for (id, result) in reorder.drain_ready() {
                Self::record(&mut aggregator, &mut metrics, id, result);
            }
        }

        metrics.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            processed = metrics.documents_processed,
            failed = metrics.total_failed(),
            relations = metrics.relations,
            elapsed_ms = metrics.elapsed_ms,
            "Pipeline finished"
        );

        Ok(PipelineOutcome {
            model: aggregator.finalize(),
            metrics,
        })
    }

    fn record(aggregator: &mut Aggregator, metrics: &mut RunMetrics, id: DocumentId, result: WorkerResult) {
        match result {
            WorkerResult::Analyzed(analysis) => {
                metrics.record_processed(
                    analysis.entities.len(),
                    analysis.actions.len(),
                    analysis.relations.len(),
                    analysis.ambiguities_resolved,
                );
                aggregator.apply(&analysis);
            }
            WorkerResult::Failed { kind: "panic", message } => {
                error!(document_id = %id, error = %message, "Worker panicked; document skipped");
                metrics.record_failure("panic");
            }
            WorkerResult::Failed { kind, message } => {
                warn!(document_id = %id, kind, error = %message, "Document skipped");
                metrics.record_failure(kind);
            }
        }
    }

    /// Write the outcome's report to the configured output file
    pub fn write_report(&self, outcome: &PipelineOutcome) -> Result<Report, PipelineError> {
        let report = outcome.report(self.config.pipeline.top_n);
        JsonFileSink::new(&self.config.output.path, self.config.output.pretty).write(&report)?;
        Ok(report)
    }
}
