//! Actant Domain Layer
//!
//! This crate contains the value objects and capability traits shared by every
//! other crate in the workspace. It depends on nothing but `serde`, and holds no
//! behavior beyond validation and small helpers on the types themselves.
//!
//! ## Key Concepts
//!
//! - **Document**: one official text (speech, declaration, press release) with
//!   its country, source and language metadata
//! - **Entity**: a typed mention (Country, Organization, Person, Project)
//! - **Action**: a predicate span classified into the action taxonomy
//! - **ActantRelation**: an entity/action pair labelled with one of Greimas's
//!   six actant roles and a confidence in `[0, 1]`
//! - **DocumentAnalysis**: everything one document contributes to the corpus
//!
//! ## Architecture
//!
//! Extraction lives in `actant-extractor`, accumulation in
//! `actant-aggregator`. Both only speak in the types defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod analysis;
pub mod confidence;
pub mod document;
pub mod entity;
pub mod relation;
pub mod span;
pub mod traits;

// Re-exports for convenience
pub use action::{Action, ActionId, ActionType};
pub use analysis::DocumentAnalysis;
pub use confidence::Confidence;
pub use document::{Document, DocumentId, Script};
pub use entity::{Entity, EntityId, EntityType};
pub use relation::{ActantRelation, ActantRole};
pub use span::Span;
