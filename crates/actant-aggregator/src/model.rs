//! The accumulated corpus model

use crate::network::ActantNetwork;
use actant_domain::{ActantRole, ActionType, DocumentAnalysis, DocumentId, EntityType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Mention and document counts for one (type, normalized form)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStats {
    /// Mentions across the corpus
    pub mentions: u64,
    /// Documents mentioning the entity at least once
    pub documents: u64,
}

/// A relation kept verbatim for the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSample {
    /// Source document
    pub document_id: DocumentId,
    /// Publishing country
    pub country: String,
    /// Entity normalized form
    pub entity: String,
    /// Entity type
    pub entity_type: EntityType,
    /// Action head as written
    pub action: String,
    /// Action category
    pub action_type: ActionType,
    /// Assigned role
    pub role: ActantRole,
    /// Relation confidence
    pub confidence: f64,
    /// Sentence excerpt
    pub evidence: String,
}

/// Corpus-wide statistics built from per-document analyses
///
/// Every table is a plain sum over documents, so contributions can be
/// applied in any order or reduced from per-worker partials. The only
/// order-dependent part is which relations end up in the bounded sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedModel {
    pub(crate) documents_processed: u64,
    pub(crate) documents_without_actions: u64,
    pub(crate) entities_total: u64,
    pub(crate) actions_total: u64,
    pub(crate) relations_total: u64,
    pub(crate) ambiguities_resolved: u64,
    pub(crate) entity_frequency: BTreeMap<(EntityType, String), EntityStats>,
    pub(crate) action_global: BTreeMap<ActionType, u64>,
    pub(crate) action_by_country: BTreeMap<String, BTreeMap<ActionType, u64>>,
    pub(crate) heatmap: BTreeMap<(String, ActantRole), u64>,
    pub(crate) cooccurrence: BTreeMap<(ActionType, EntityType), u64>,
    pub(crate) network: ActantNetwork,
    pub(crate) samples: Vec<RelationSample>,
}

impl AggregatedModel {
    /// An empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// The partial model holding exactly one document's contribution
    ///
    /// Relations pointing at ids missing from the analysis are ignored.
    pub fn contribution(analysis: &DocumentAnalysis, sample_limit: usize) -> Self {
        let mut model = Self {
            documents_processed: 1,
            documents_without_actions: u64::from(analysis.is_action_free()),
            entities_total: analysis.entities.len() as u64,
            actions_total: analysis.actions.len() as u64,
            ambiguities_resolved: analysis.ambiguities_resolved as u64,
            ..Self::default()
        };

        // 1. Entity frequencies
        let mut seen = BTreeSet::new();
        for entity in &analysis.entities {
            let key = (entity.entity_type, entity.normalized_form.clone());
            model.entity_frequency.entry(key.clone()).or_default().mentions += 1;
            if seen.insert(key.clone()) {
                model.entity_frequency.entry(key).or_default().documents += 1;
            }
        }

        // 2. Action distributions
        for action in &analysis.actions {
            *model.action_global.entry(action.action_type).or_insert(0) += 1;
            *model
                .action_by_country
                .entry(analysis.country.clone())
                .or_default()
                .entry(action.action_type)
                .or_insert(0) += 1;
        }

        // 3. Relations: heatmap, co-occurrence, network, samples
        let entities: HashMap<_, _> = analysis.entities.iter().map(|e| (e.id, e)).collect();
        let actions: HashMap<_, _> = analysis.actions.iter().map(|a| (a.id, a)).collect();

        for relation in &analysis.relations {
            let (Some(entity), Some(action)) = (entities.get(&relation.entity_id), actions.get(&relation.action_id))
            else {
                debug!(
                    document_id = %analysis.document_id,
                    entity_id = %relation.entity_id,
                    action_id = %relation.action_id,
                    "Relation references unknown ids; ignored"
                );
                continue;
            };

            model.relations_total += 1;
            *model
                .heatmap
                .entry((analysis.country.clone(), relation.role))
                .or_insert(0) += 1;
            *model
                .cooccurrence
                .entry((action.action_type, entity.entity_type))
                .or_insert(0) += 1;
            model.network.add_relation(
                entity.entity_type,
                &entity.normalized_form,
                action.action_type,
                relation.role,
                relation.confidence.value(),
            );

            if model.samples.len() < sample_limit {
                model.samples.push(RelationSample {
                    document_id: analysis.document_id.clone(),
                    country: analysis.country.clone(),
                    entity: entity.normalized_form.clone(),
                    entity_type: entity.entity_type,
                    action: action.surface_form.clone(),
                    action_type: action.action_type,
                    role: relation.role,
                    confidence: relation.confidence.value(),
                    evidence: relation.evidence.clone(),
                });
            }
        }

        model
    }

    /// Add another model's counts into this one
    pub fn absorb(&mut self, other: AggregatedModel, sample_limit: usize) {
        self.documents_processed += other.documents_processed;
        self.documents_without_actions += other.documents_without_actions;
        self.entities_total += other.entities_total;
        self.actions_total += other.actions_total;
        self.relations_total += other.relations_total;
        self.ambiguities_resolved += other.ambiguities_resolved;

        for (key, stats) in other.entity_frequency {
            let entry = self.entity_frequency.entry(key).or_default();
            entry.mentions += stats.mentions;
            entry.documents += stats.documents;
        }
        for (action_type, count) in other.action_global {
            *self.action_global.entry(action_type).or_insert(0) += count;
        }
        for (country, counts) in other.action_by_country {
            let row = self.action_by_country.entry(country).or_default();
            for (action_type, count) in counts {
                *row.entry(action_type).or_insert(0) += count;
            }
        }
        for (key, count) in other.heatmap {
            *self.heatmap.entry(key).or_insert(0) += count;
        }
        for (key, count) in other.cooccurrence {
            *self.cooccurrence.entry(key).or_insert(0) += count;
        }
        self.network.merge(other.network);

        let room = sample_limit.saturating_sub(self.samples.len());
        self.samples.extend(other.samples.into_iter().take(room));
    }

    /// Documents applied so far
    pub fn documents_processed(&self) -> u64 {
        self.documents_processed
    }

    /// Documents that contributed no actions
    pub fn documents_without_actions(&self) -> u64 {
        self.documents_without_actions
    }

    /// Relations applied so far
    pub fn relations_total(&self) -> u64 {
        self.relations_total
    }

    /// Entity frequency table
    pub fn entity_frequency(&self) -> &BTreeMap<(EntityType, String), EntityStats> {
        &self.entity_frequency
    }

    /// Global action-type counts
    pub fn action_global(&self) -> &BTreeMap<ActionType, u64> {
        &self.action_global
    }

    /// Per-country action-type counts
    pub fn action_by_country(&self) -> &BTreeMap<String, BTreeMap<ActionType, u64>> {
        &self.action_by_country
    }

    /// (country, role) counts
    pub fn heatmap(&self) -> &BTreeMap<(String, ActantRole), u64> {
        &self.heatmap
    }

    /// (action type, entity type) counts
    pub fn cooccurrence(&self) -> &BTreeMap<(ActionType, EntityType), u64> {
        &self.cooccurrence
    }

    /// The actant network
    pub fn network(&self) -> &ActantNetwork {
        &self.network
    }

    /// Sampled relations
    pub fn samples(&self) -> &[RelationSample] {
        &self.samples
    }
}
