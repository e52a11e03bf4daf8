//! Actant relation module (Greimas's six-role model)

use crate::{ActionId, Confidence, DocumentId, EntityId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Narrative role an entity plays with respect to an action
///
/// The declaration order doubles as the deterministic tie-break order when
/// two roles score exactly the same for one entity/action pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActantRole {
    /// The actor performing the action
    Subject,
    /// The goal or thing acted upon
    Object,
    /// The instigator or motivating authority
    Sender,
    /// The beneficiary
    Receiver,
    /// A supporting party
    Helper,
    /// An adversarial party
    Opponent,
}

impl ActantRole {
    /// All roles in canonical order
    pub const ALL: [ActantRole; 6] = [
        ActantRole::Subject,
        ActantRole::Object,
        ActantRole::Sender,
        ActantRole::Receiver,
        ActantRole::Helper,
        ActantRole::Opponent,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            ActantRole::Subject => "Subject",
            ActantRole::Object => "Object",
            ActantRole::Sender => "Sender",
            ActantRole::Receiver => "Receiver",
            ActantRole::Helper => "Helper",
            ActantRole::Opponent => "Opponent",
        }
    }

    /// Position in [`ActantRole::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ActantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subject" => Ok(ActantRole::Subject),
            "object" => Ok(ActantRole::Object),
            "sender" => Ok(ActantRole::Sender),
            "receiver" => Ok(ActantRole::Receiver),
            "helper" => Ok(ActantRole::Helper),
            "opponent" => Ok(ActantRole::Opponent),
            other => Err(format!("Unknown actant role: {}", other)),
        }
    }
}

/// An entity/action pair labelled with its actant role
///
/// Within one document there is at most one relation per
/// `(entity_id, action_id)`; other documents assign roles independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActantRelation {
    /// Entity taking the role
    pub entity_id: EntityId,

    /// Action the role is relative to
    pub action_id: ActionId,

    /// Assigned role
    pub role: ActantRole,

    /// Score of the winning role
    pub confidence: Confidence,

    /// Owning document
    pub document_id: DocumentId,

    /// Sentence excerpt the relation was read from
    #[serde(default)]
    pub evidence: String,
}

impl ActantRelation {
    /// Key that must be unique within a document
    pub fn key(&self) -> (EntityId, ActionId) {
        (self.entity_id, self.action_id)
    }
}
