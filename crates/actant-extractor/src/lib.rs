//! Actant Extractor
//!
//! Turns the text of one document into typed entities, classified actions
//! and actant relations.
//!
//! # Overview
//!
//! Each document goes through three pure stages:
//!
//! ```text
//! Document → Recognizer → Entities
//!          → ActionExtractor → Actions
//!          → RoleAssigner → ActantRelations
//! ```
//!
//! - **Recognizer**: statistical named-entity models where configured,
//!   otherwise a bilingual gazetteer with person/organization/project
//!   heuristics. Overlapping candidates resolve to the longest span.
//! - **ActionExtractor**: predicate spans from a lemma/pattern/keyword
//!   lexicon plus generic verb detection; unmatched predicates classify as
//!   `Other`.
//! - **RoleAssigner**: scores every entity within the proximity window of an
//!   action for the six actant roles using position, cue phrases and
//!   distance, keeping the best role per pair.
//!
//! # Example Usage
//!
//! ```no_run
//! use actant_domain::Document;
//! use actant_extractor::{DocumentAnalyzer, ExtractorConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = DocumentAnalyzer::new(ExtractorConfig::default())?;
//! let document = Document::new("doc-1", "China and Kenya signed a cooperation agreement.")
//!     .with_country("Kenya");
//!
//! let analysis = analyzer.analyze(&document)?;
//! for relation in &analysis.relations {
//!     println!("{} {} {}", relation.entity_id, relation.role, relation.action_id);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod actions;
mod analyzer;
mod assigner;
mod canonical;
mod config;
mod cues;
mod error;
mod gazetteer;
mod lexicon;
mod recognizer;
mod scoring;
pub mod text;


pub use actions::ActionExtractor;
pub use analyzer::DocumentAnalyzer;
pub use assigner::{Assignment, RoleAssigner, MAX_EVIDENCE_CHARS};
pub use canonical::CanonicalTable;
pub use config::{CueConfig, ExtractorConfig};
pub use cues::{Cue, CueTable};
pub use error::ExtractorError;
pub use gazetteer::{Gazetteer, GazetteerTerm};
pub use lexicon::{lemma_matches, ActionLexicon, GappedPattern};
pub use recognizer::{map_label, Recognizer, RuleBasedRecognizer, StatisticalRecognizer};
pub use scoring::{
    affinity, best_role, proximity_factor, CueMatch, PairContext, Position, RoleScorer, RoleScores,
    WeightedScorer,
};
