//! Single-writer accumulator

use crate::model::AggregatedModel;
use crate::report::FinalizedModel;
use actant_domain::DocumentAnalysis;
use tracing::{debug, info};

/// Default number of relations kept for the report
pub const DEFAULT_SAMPLE_LIMIT: usize = 50;

/// Owns the corpus model; every mutation goes through `&mut self`
///
/// Workers analyze documents in parallel and hand their
/// [`DocumentAnalysis`] to the one task that owns the aggregator, or build
/// partial models with [`AggregatedModel::contribution`] and reduce them
/// here with [`Aggregator::absorb`].
#[derive(Debug, Clone)]
pub struct Aggregator {
    model: AggregatedModel,
    sample_limit: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::with_sample_limit(DEFAULT_SAMPLE_LIMIT)
    }

    /// Create an empty aggregator keeping at most `sample_limit` relations
    pub fn with_sample_limit(sample_limit: usize) -> Self {
        Self {
            model: AggregatedModel::new(),
            sample_limit,
        }
    }

    /// Apply one document's contribution
    ///
    /// The contribution is built completely before it touches the model, so
    /// the model never holds half a document.
    pub fn apply(&mut self, analysis: &DocumentAnalysis) {
        let contribution = AggregatedModel::contribution(analysis, self.sample_limit);
        debug!(
            document_id = %analysis.document_id,
            country = %analysis.country,
            relations = contribution.relations_total(),
            "Applying document contribution"
        );
        self.model.absorb(contribution, self.sample_limit);
    }

    /// Merge a partial model built elsewhere
    pub fn absorb(&mut self, partial: AggregatedModel) {
        self.model.absorb(partial, self.sample_limit);
    }

    /// Current counts
    pub fn model(&self) -> &AggregatedModel {
        &self.model
    }

    /// Stop accepting documents and expose the read-only views
    pub fn finalize(self) -> FinalizedModel {
        info!(
            documents = self.model.documents_processed(),
            relations = self.model.relations_total(),
            nodes = self.model.network().node_count(),
            edges = self.model.network().edge_count(),
            "Aggregation finalized"
        );
        FinalizedModel::new(self.model)
    }
}
