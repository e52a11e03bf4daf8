//! Action module - predicates classified into the action taxonomy

use crate::{DocumentId, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action identifier, unique within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub u32);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// Category of an action
///
/// The taxonomy is closed: every extracted predicate lands in exactly one
/// category, with `Other` catching everything the lexicon does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Joint work, partnerships, agreements
    Cooperation,
    /// Building, developing, establishing
    Construction,
    /// Import, export, commerce
    Trade,
    /// Capital investment
    Investment,
    /// Visits, talks, dialogue, summits
    Diplomatic,
    /// Loans, credit, funding
    Financing,
    /// Any predicate without a lexicon category
    Other,
}

impl ActionType {
    /// All action types in canonical order
    pub const ALL: [ActionType; 7] = [
        ActionType::Cooperation,
        ActionType::Construction,
        ActionType::Trade,
        ActionType::Investment,
        ActionType::Diplomatic,
        ActionType::Financing,
        ActionType::Other,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Cooperation => "Cooperation",
            ActionType::Construction => "Construction",
            ActionType::Trade => "Trade",
            ActionType::Investment => "Investment",
            ActionType::Diplomatic => "Diplomatic",
            ActionType::Financing => "Financing",
            ActionType::Other => "Other",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cooperation" => Ok(ActionType::Cooperation),
            "construction" => Ok(ActionType::Construction),
            "trade" => Ok(ActionType::Trade),
            "investment" => Ok(ActionType::Investment),
            "diplomatic" | "communication" => Ok(ActionType::Diplomatic),
            "financing" | "finance" => Ok(ActionType::Financing),
            "other" => Ok(ActionType::Other),
            other => Err(format!("Unknown action type: {}", other)),
        }
    }
}

/// A predicate extracted from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Identifier within the document
    pub id: ActionId,

    /// Head word of the predicate as it appears in the text
    pub surface_form: String,

    /// Lexicon key that classified the predicate (lowercased surface for `Other`)
    pub lemma: String,

    /// Action category
    pub action_type: ActionType,

    /// Byte offsets of the head word
    pub span: Span,

    /// Byte offsets of the whole predicate phrase (covers `span`)
    pub phrase_span: Span,

    /// Owning document
    pub document_id: DocumentId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_round_trip_names() {
        for action_type in ActionType::ALL {
            assert_eq!(action_type.as_str().parse::<ActionType>().unwrap(), action_type);
        }
    }

    #[test]
    fn test_legacy_category_names() {
        assert_eq!("communication".parse::<ActionType>().unwrap(), ActionType::Diplomatic);
        assert_eq!("finance".parse::<ActionType>().unwrap(), ActionType::Financing);
    }
}
