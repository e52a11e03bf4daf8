//! Entity module - typed mentions recognized in a document

use crate::{DocumentId, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity identifier, unique within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Type of a recognized entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A state or country (also covers country adjectives such as "Chinese")
    Country,
    /// Ministries, banks, funds, international bodies
    Organization,
    /// Named individuals
    Person,
    /// Initiatives, corridors, railways, ports, agreements
    Project,
}

impl EntityType {
    /// All entity types in canonical order
    pub const ALL: [EntityType; 4] = [
        EntityType::Country,
        EntityType::Organization,
        EntityType::Person,
        EntityType::Project,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Country => "Country",
            EntityType::Organization => "Organization",
            EntityType::Person => "Person",
            EntityType::Project => "Project",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "country" | "countries" => Ok(EntityType::Country),
            "organization" | "organisation" | "organizations" | "org" => {
                Ok(EntityType::Organization)
            }
            "person" | "persons" | "people" => Ok(EntityType::Person),
            "project" | "projects" => Ok(EntityType::Project),
            other => Err(format!("Unknown entity type: {}", other)),
        }
    }
}

/// A typed entity mention in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier within the document
    pub id: EntityId,

    /// Text exactly as it appears in the document
    pub surface_form: String,

    /// Canonical form shared by surface variants (abbreviations, translations)
    pub normalized_form: String,

    /// Entity type
    pub entity_type: EntityType,

    /// Byte offsets of the mention
    pub span: Span,

    /// Owning document
    pub document_id: DocumentId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_parsing() {
        assert_eq!("country".parse::<EntityType>().unwrap(), EntityType::Country);
        assert_eq!("Organisation".parse::<EntityType>().unwrap(), EntityType::Organization);
        assert_eq!("PERSON".parse::<EntityType>().unwrap(), EntityType::Person);
        assert_eq!("projects".parse::<EntityType>().unwrap(), EntityType::Project);
        assert!("city".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(3).to_string(), "E3");
    }
}
