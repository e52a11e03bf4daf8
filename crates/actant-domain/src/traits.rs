//! Trait definitions for pluggable capabilities
//!
//! These traits define the seams between the extraction engine and the parts
//! that vary per deployment: the entity recognizer strategy and the optional
//! statistical named-entity models.

use crate::{Document, Entity, Script};
use std::sync::Arc;

/// Trait for turning a document into typed entities
///
/// Implemented by the extraction layer (actant-extractor). Output must be
/// ordered by span start and free of overlapping spans.
pub trait EntityRecognizer {
    /// Error type for recognition
    type Error;

    /// Recognize entities in `document`, tagged with the resolved `language`
    fn recognize(&self, document: &Document, language: &str) -> Result<Vec<Entity>, Self::Error>;

    /// Whether this recognizer can handle a language written in `script`
    fn supports(&self, language: &str, script: Script) -> bool;
}

/// A span labelled by a statistical named-entity model
#[derive(Debug, Clone, PartialEq)]
pub struct NerSpan {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Model label, e.g. `GPE`, `ORG`, `PERSON`
    pub label: String,
    /// Model score in `[0, 1]`
    pub score: f64,
}

/// A loaded, language-specific named-entity model
pub trait NerModel: Send + Sync {
    /// Model identifier it was loaded from
    fn name(&self) -> &str;

    /// Label spans in `text`
    fn predict(&self, text: &str) -> Vec<NerSpan>;
}

/// Resolves model identifiers from configuration into loaded models
///
/// Called once per configured language at initialization.
pub trait NerModelProvider {
    /// Load the model named by `identifier`
    fn load(&self, identifier: &str) -> Result<Arc<dyn NerModel>, String>;
}
