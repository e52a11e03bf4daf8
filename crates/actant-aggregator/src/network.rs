//! Weighted actant network

use actant_domain::{ActantRole, ActionType, EntityType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node identifier for an entity (one node per normalized form and type)
pub fn entity_node_id(entity_type: EntityType, normalized_form: &str) -> String {
    format!("entity:{}:{}", entity_type, normalized_form)
}

/// Node identifier for an action category
pub fn action_node_id(action_type: ActionType) -> String {
    format!("action:{}", action_type)
}

#[derive(Debug, Clone, PartialEq)]
struct NodeStats {
    label: String,
    node_type: String,
    weight: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct EdgeStats {
    weight: u64,
    confidence_sum: f64,
}

/// Node view: an entity or an action category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Stable identifier (`entity:Country:China`, `action:Trade`)
    pub id: String,
    /// Display label
    pub label: String,
    /// Entity type name, or `Action`
    #[serde(rename = "type")]
    pub node_type: String,
    /// Number of relations touching the node
    pub weight: u64,
}

/// Edge view: entity -> action category under one role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    /// Entity node
    pub source_id: String,
    /// Action node
    pub target_id: String,
    /// Role label
    pub role: ActantRole,
    /// Number of relations across documents
    pub weight: u64,
    /// Mean relation confidence
    pub confidence: f64,
}

/// Accumulating network; edges are keyed by (source, target, role)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActantNetwork {
    nodes: BTreeMap<String, NodeStats>,
    edges: BTreeMap<(String, String, ActantRole), EdgeStats>,
}

impl ActantNetwork {
    /// Create an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one relation
    pub fn add_relation(
        &mut self,
        entity_type: EntityType,
        normalized_form: &str,
        action_type: ActionType,
        role: ActantRole,
        confidence: f64,
    ) {
        let source = entity_node_id(entity_type, normalized_form);
        let target = action_node_id(action_type);

        self.touch_node(&source, normalized_form, entity_type.as_str());
        self.touch_node(&target, action_type.as_str(), "Action");

        let edge = self.edges.entry((source, target, role)).or_default();
        edge.weight += 1;
        edge.confidence_sum += confidence;
    }

    fn touch_node(&mut self, id: &str, label: &str, node_type: &str) {
        self.nodes
            .entry(id.to_string())
            .or_insert_with(|| NodeStats {
                label: label.to_string(),
                node_type: node_type.to_string(),
                weight: 0,
            })
            .weight += 1;
    }

    /// Fold another network into this one
    pub fn merge(&mut self, other: ActantNetwork) {
        for (id, stats) in other.nodes {
            match self.nodes.get_mut(&id) {
                Some(existing) => existing.weight += stats.weight,
                None => {
                    self.nodes.insert(id, stats);
                }
            }
        }
        for (key, stats) in other.edges {
            let edge = self.edges.entry(key).or_default();
            edge.weight += stats.weight;
            edge.confidence_sum += stats.confidence_sum;
        }
    }

    /// Node count
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edge count
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Weight of a node, 0 if absent
    pub fn node_weight(&self, id: &str) -> u64 {
        self.nodes.get(id).map(|n| n.weight).unwrap_or(0)
    }

    /// Edge between an entity node and an action node under `role`
    pub fn edge(&self, source_id: &str, target_id: &str, role: ActantRole) -> Option<NetworkEdge> {
        self.edges
            .get(&(source_id.to_string(), target_id.to_string(), role))
            .map(|stats| edge_view(source_id, target_id, role, stats))
    }

    /// All nodes, ordered by id
    pub fn nodes(&self) -> Vec<NetworkNode> {
        self.nodes
            .iter()
            .map(|(id, stats)| NetworkNode {
                id: id.clone(),
                label: stats.label.clone(),
                node_type: stats.node_type.clone(),
                weight: stats.weight,
            })
            .collect()
    }

    /// All edges, ordered by (source, target, role)
    pub fn edges(&self) -> Vec<NetworkEdge> {
        self.edges
            .iter()
            .map(|((source, target, role), stats)| edge_view(source, target, *role, stats))
            .collect()
    }
}

fn edge_view(source: &str, target: &str, role: ActantRole, stats: &EdgeStats) -> NetworkEdge {
    let confidence = if stats.weight == 0 {
        0.0
    } else {
        stats.confidence_sum / stats.weight as f64
    };
    NetworkEdge {
        source_id: source.to_string(),
        target_id: target.to_string(),
        role,
        weight: stats.weight,
        confidence,
    }
}
