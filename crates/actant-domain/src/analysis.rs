//! Per-document analysis result

use crate::{ActantRelation, Action, ActionId, DocumentId, Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Everything one document contributes to the corpus
///
/// Produced by the extractor, consumed (and dropped) by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Source document
    pub document_id: DocumentId,

    /// Publishing country, copied from the document
    pub country: String,

    /// Resolved language (detected when the document did not carry one)
    pub language: String,

    /// Recognized entities, ordered by span start, non-overlapping
    pub entities: Vec<Entity>,

    /// Extracted actions, ordered by span start
    pub actions: Vec<Action>,

    /// Scored actant relations
    pub relations: Vec<ActantRelation>,

    /// Entity/action pairs whose two best roles tied and were broken by role order
    #[serde(default)]
    pub ambiguities_resolved: usize,
}

impl DocumentAnalysis {
    /// An analysis with nothing in it
    pub fn empty(document_id: DocumentId, country: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            document_id,
            country: country.into(),
            language: language.into(),
            entities: Vec::new(),
            actions: Vec::new(),
            relations: Vec::new(),
            ambiguities_resolved: 0,
        }
    }

    /// Look up an entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up an action by id
    pub fn action(&self, id: ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Whether extraction found no predicates (a zero-contribution document)
    pub fn is_action_free(&self) -> bool {
        self.actions.is_empty()
    }
}
