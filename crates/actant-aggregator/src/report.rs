//! Finalized views over the aggregated model

use crate::metrics::RunMetrics;
use crate::model::{AggregatedModel, RelationSample};
use crate::network::{NetworkEdge, NetworkNode};
use actant_domain::{ActantRole, ActionType, EntityType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// One row of the entity frequency table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFrequency {
    /// Entity type
    pub entity_type: EntityType,
    /// Canonical name
    pub normalized_form: String,
    /// Mentions across the corpus
    pub mentions: u64,
    /// Documents mentioning it
    pub documents: u64,
}

/// Action-type counts, globally and per publishing country
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDistribution {
    /// Action type name to count
    pub global: BTreeMap<String, u64>,
    /// Country to (action type name to count)
    pub by_country: BTreeMap<String, BTreeMap<String, u64>>,
}

/// Countries × roles count matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleHeatmap {
    /// Row labels, sorted
    pub countries: Vec<String>,
    /// Column labels in role declaration order
    pub roles: Vec<ActantRole>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<u64>>,
}

impl RoleHeatmap {
    /// Count for one cell, 0 when the country is absent
    pub fn get(&self, country: &str, role: ActantRole) -> u64 {
        self.countries
            .iter()
            .position(|c| c == country)
            .map(|row| self.cells[row][role.index()])
            .unwrap_or(0)
    }
}

/// Action types × entity types count matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CooccurrenceMatrix {
    /// Row labels
    pub action_types: Vec<ActionType>,
    /// Column labels
    pub entity_types: Vec<EntityType>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<u64>>,
}

/// Network snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkView {
    /// Nodes ordered by id
    pub nodes: Vec<NetworkNode>,
    /// Edges ordered by (source, target, role)
    pub edges: Vec<NetworkEdge>,
}

/// The serialized output of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique run identifier (UUIDv7)
    pub run_id: String,
    /// Unix timestamp (seconds) the report was assembled
    pub generated_at: u64,
    /// Run counters
    pub metrics: RunMetrics,
    /// Full frequency table, most mentioned first
    pub entity_frequencies: Vec<EntityFrequency>,
    /// Top-N rows per entity type
    pub top_entities: BTreeMap<String, Vec<EntityFrequency>>,
    /// Action distribution
    pub action_distribution: ActionDistribution,
    /// Country × role heatmap
    pub role_heatmap: RoleHeatmap,
    /// Action × entity co-occurrence
    pub cooccurrence: CooccurrenceMatrix,
    /// Actant network
    pub network: NetworkView,
    /// Sampled relations with evidence
    pub relation_samples: Vec<RelationSample>,
}

/// Read-only model produced by [`crate::Aggregator::finalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedModel {
    model: AggregatedModel,
}

impl FinalizedModel {
    pub(crate) fn new(model: AggregatedModel) -> Self {
        Self { model }
    }

    /// Underlying counts
    pub fn model(&self) -> &AggregatedModel {
        &self.model
    }

    /// Documents applied
    pub fn documents_processed(&self) -> u64 {
        self.model.documents_processed
    }

    /// Frequency rows sorted by mentions (desc), then type and name
    pub fn entity_frequencies(&self) -> Vec<EntityFrequency> {
        let mut rows: Vec<EntityFrequency> = self
            .model
            .entity_frequency
            .iter()
            .map(|((entity_type, name), stats)| EntityFrequency {
                entity_type: *entity_type,
                normalized_form: name.clone(),
                mentions: stats.mentions,
                documents: stats.documents,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.mentions
                .cmp(&a.mentions)
                .then(a.entity_type.cmp(&b.entity_type))
                .then_with(|| a.normalized_form.cmp(&b.normalized_form))
        });
        rows
    }

    /// Mention count of one entity
    pub fn entity_count(&self, entity_type: EntityType, normalized_form: &str) -> u64 {
        self.model
            .entity_frequency
            .get(&(entity_type, normalized_form.to_string()))
            .map(|s| s.mentions)
            .unwrap_or(0)
    }

    /// The `n` most mentioned entities of one type
    pub fn top_entities(&self, entity_type: EntityType, n: usize) -> Vec<EntityFrequency> {
        self.entity_frequencies()
            .into_iter()
            .filter(|row| row.entity_type == entity_type)
            .take(n)
            .collect()
    }

    /// Global count for one action type
    pub fn action_count(&self, action_type: ActionType) -> u64 {
        self.model.action_global.get(&action_type).copied().unwrap_or(0)
    }

    /// Count for one action type within one country
    pub fn action_count_for(&self, country: &str, action_type: ActionType) -> u64 {
        self.model
            .action_by_country
            .get(country)
            .and_then(|row| row.get(&action_type))
            .copied()
            .unwrap_or(0)
    }

    /// Action distribution keyed by type names
    pub fn action_distribution(&self) -> ActionDistribution {
        let names = |counts: &BTreeMap<ActionType, u64>| {
            counts
                .iter()
                .map(|(action_type, count)| (action_type.as_str().to_string(), *count))
                .collect::<BTreeMap<_, _>>()
        };
        ActionDistribution {
            global: names(&self.model.action_global),
            by_country: self
                .model
                .action_by_country
                .iter()
                .map(|(country, counts)| (country.clone(), names(counts)))
                .collect(),
        }
    }

    /// Countries × six roles; every role column is present
    pub fn role_heatmap(&self) -> RoleHeatmap {
        let mut countries: Vec<String> = self.model.heatmap.keys().map(|(c, _)| c.clone()).collect();
        countries.dedup();

        let cells = countries
            .iter()
            .map(|country| {
                ActantRole::ALL
                    .iter()
                    .map(|role| {
                        self.model
                            .heatmap
                            .get(&(country.clone(), *role))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        RoleHeatmap {
            countries,
            roles: ActantRole::ALL.to_vec(),
            cells,
        }
    }

    /// Full action-type × entity-type matrix
    pub fn cooccurrence(&self) -> CooccurrenceMatrix {
        let cells = ActionType::ALL
            .iter()
            .map(|action_type| {
                EntityType::ALL
                    .iter()
                    .map(|entity_type| {
                        self.model
                            .cooccurrence
                            .get(&(*action_type, *entity_type))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        CooccurrenceMatrix {
            action_types: ActionType::ALL.to_vec(),
            entity_types: EntityType::ALL.to_vec(),
            cells,
        }
    }

    /// Network nodes and edges
    pub fn network(&self) -> NetworkView {
        NetworkView {
            nodes: self.model.network.nodes(),
            edges: self.model.network.edges(),
        }
    }

    /// Sampled relations
    pub fn relation_samples(&self) -> &[RelationSample] {
        &self.model.samples
    }

    /// Assemble the serializable report
    pub fn to_report(&self, metrics: RunMetrics, top_n: usize) -> Report {
        let top_entities = EntityType::ALL
            .iter()
            .map(|entity_type| (entity_type.as_str().to_string(), self.top_entities(*entity_type, top_n)))
            .filter(|(_, rows)| !rows.is_empty())
            .collect();

        let generated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Report {
            run_id: uuid::Uuid::now_v7().to_string(),
            generated_at,
            metrics,
            entity_frequencies: self.entity_frequencies(),
            top_entities,
            action_distribution: self.action_distribution(),
            role_heatmap: self.role_heatmap(),
            cooccurrence: self.cooccurrence(),
            network: self.network(),
            relation_samples: self.model.samples.clone(),
        }
    }
}
