//! Error types for the Extractor

use actant_domain::{DocumentId, Script};
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Documents without predicates and tied role scores are not errors; they
/// show up as empty action lists and as `ambiguities_resolved` counts.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// No model and no gazetteer can handle the document's language
    #[error("Recognition failure for document {document_id}: no model or gazetteer for language '{language}' ({script})")]
    RecognitionFailure {
        /// Document that could not be processed
        document_id: DocumentId,
        /// Resolved language tag
        language: String,
        /// Detected script
        script: Script,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed action lexicon or cue entry
    #[error("Invalid lexicon entry: {0}")]
    InvalidLexicon(String),

    /// Statistical model could not be loaded
    #[error("Model error: {0}")]
    Model(String),

    /// Pattern compilation failed
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
