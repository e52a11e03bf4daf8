//! Startup check that every corpus language can be recognized

use crate::error::PipelineError;
use actant_domain::Document;
use actant_extractor::DocumentAnalyzer;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Resolved language tag -> number of documents
pub fn corpus_languages(analyzer: &DocumentAnalyzer, documents: &[Document]) -> BTreeMap<String, usize> {
    let mut languages = BTreeMap::new();
    for document in documents {
        *languages.entry(analyzer.resolve_language(document)).or_insert(0) += 1;
    }
    languages
}

/// Fail with `CoverageMissing` for the first language nothing can recognize
///
/// A language is covered when every one of its documents passes
/// [`DocumentAnalyzer::supports_document`], which looks at the script of the
/// text rather than the tag. Documents without letters analyze to an empty
/// result and never block a run.
pub fn check_coverage(analyzer: &DocumentAnalyzer, documents: &[Document]) -> Result<(), PipelineError> {
    let mut uncovered: BTreeMap<String, usize> = BTreeMap::new();
    for document in documents {
        if !analyzer.supports_document(document) {
            *uncovered.entry(analyzer.resolve_language(document)).or_insert(0) += 1;
        }
    }

    if let Some((language, count)) = uncovered.into_iter().next() {
        warn!(language = %language, documents = count, "Language has no model or gazetteer coverage");
        return Err(PipelineError::CoverageMissing { language });
    }

    info!(languages = ?corpus_languages(analyzer, documents), "Language coverage verified");
    Ok(())
}
