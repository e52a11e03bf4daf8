//! Run metrics for one corpus pass

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counters collected while a corpus is processed
///
/// Tracks how many documents were seen, analyzed, filtered and failed,
/// plus totals of what the analyzed ones produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Documents found in the corpus
    pub documents_seen: usize,

    /// Documents analyzed and applied to the model
    pub documents_processed: usize,

    /// Documents skipped before analysis (too short, empty)
    pub documents_filtered: usize,

    /// Analyzed documents that yielded no actions
    pub documents_without_actions: usize,

    /// Entities recognized
    pub entities: usize,

    /// Actions extracted
    pub actions: usize,

    /// Relations assigned
    pub relations: usize,

    /// Role ties broken by declaration order
    pub ambiguities_resolved: usize,

    /// Failed documents, keyed by failure kind
    pub failures: BTreeMap<String, usize>,

    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document discovered in the corpus
    pub fn record_seen(&mut self) {
        self.documents_seen += 1;
    }

    /// Record a document filtered out before analysis
    pub fn record_filtered(&mut self) {
        self.documents_filtered += 1;
    }

    /// Record a successfully analyzed document
    pub fn record_processed(&mut self, entities: usize, actions: usize, relations: usize, ambiguities: usize) {
        self.documents_processed += 1;
        if actions == 0 {
            self.documents_without_actions += 1;
        }
        self.entities += entities;
        self.actions += actions;
        self.relations += relations;
        self.ambiguities_resolved += ambiguities;
    }

    /// Record a failed document
    pub fn record_failure(&mut self, kind: &str) {
        *self.failures.entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Total failed documents
    pub fn total_failed(&self) -> usize {
        self.failures.values().sum()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Metrics Summary".to_string(),
            "===================".to_string(),
            format!("Documents seen: {}", self.documents_seen),
            format!("Documents processed: {}", self.documents_processed),
            format!("Documents filtered: {}", self.documents_filtered),
            format!("Documents without actions: {}", self.documents_without_actions),
            format!("Entities: {}", self.entities),
            format!("Actions: {}", self.actions),
            format!("Relations: {}", self.relations),
            format!("Ambiguities resolved: {}", self.ambiguities_resolved),
            format!("Elapsed: {}ms", self.elapsed_ms),
        ];

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failures by kind:".to_string());
            for (kind, count) in &self.failures {
                lines.push(format!("  {}: {}", kind, count));
            }
            lines.push(format!("  Total: {}", self.total_failed()));
        }

        lines.join("\n")
    }
}
