//! Per-document analysis: recognize, extract, assign

use crate::actions::ActionExtractor;
use crate::assigner::RoleAssigner;
use crate::config::ExtractorConfig;
use crate::cues::CueTable;
use crate::error::ExtractorError;
use crate::lexicon::ActionLexicon;
use crate::recognizer::Recognizer;
use crate::scoring::RoleScorer;
use crate::text::{detect_language, detect_script, sentence_spans, tokenize};
use actant_domain::traits::{EntityRecognizer, NerModelProvider};
use actant_domain::{Document, DocumentAnalysis, Script};
use tracing::{debug, info};

/// Turns one document into entities, actions and scored relations
///
/// Holds only read-only tables after construction, so one analyzer can be
/// shared by any number of worker threads.
#[derive(Debug)]
pub struct DocumentAnalyzer {
    config: ExtractorConfig,
    recognizer: Recognizer,
    extractor: ActionExtractor,
    assigner: RoleAssigner,
}

impl DocumentAnalyzer {
    /// Create an analyzer using rule-based recognition only
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::build(config, None)
    }

    /// Create an analyzer that loads statistical models through `provider`
    pub fn with_model_provider(
        config: ExtractorConfig,
        provider: &dyn NerModelProvider,
    ) -> Result<Self, ExtractorError> {
        Self::build(config, Some(provider))
    }

    fn build(config: ExtractorConfig, provider: Option<&dyn NerModelProvider>) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let recognizer = Recognizer::from_config(&config, provider)?;
        let lexicon = ActionLexicon::from_config(&config)?;
        let cues = CueTable::from_config(&config)?;

        info!(
            recognizer = recognizer.strategy(),
            lexicon_entries = lexicon.len(),
            cues = cues.len(),
            window = config.proximity_window,
            "Document analyzer initialized"
        );

        let assigner = RoleAssigner::new(
            cues,
            config.proximity_window,
            config.min_confidence,
            config.cross_sentence_penalty,
        );

        Ok(Self {
            extractor: ActionExtractor::new(lexicon),
            recognizer,
            assigner,
            config,
        })
    }

    /// Replace the role scoring function
    pub fn with_scorer(mut self, scorer: impl RoleScorer + 'static) -> Self {
        self.assigner = self.assigner.with_scorer(scorer);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Active recognizer
    pub fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    /// Language tag of a document, detected when it carries none
    pub fn resolve_language(&self, document: &Document) -> String {
        if document.needs_language_detection() {
            detect_language(&document.raw_text)
        } else {
            document.language.trim().to_ascii_lowercase()
        }
    }

    /// Whether documents in `language` can be recognized
    pub fn supports_language(&self, language: &str) -> bool {
        self.recognizer.supports(language, Script::of_language(language))
    }

    /// Whether `analyze` can recognize entities in this document
    ///
    /// Decided on the script of the text itself, like recognition is. Text
    /// without letters always passes: it analyzes to an empty result.
    pub fn supports_document(&self, document: &Document) -> bool {
        let text = document.raw_text.as_str();
        if !text.chars().any(char::is_alphabetic) {
            return true;
        }
        let language = self.resolve_language(document);
        self.recognizer.supports(&language, detect_script(text))
    }

    /// Analyze one document
    ///
    /// A document without predicates is not an error: it yields an analysis
    /// with no actions and no relations.
    pub fn analyze(&self, document: &Document) -> Result<DocumentAnalysis, ExtractorError> {
        let language = self.resolve_language(document);
        let text = document.raw_text.as_str();
        let mut analysis = DocumentAnalysis::empty(document.id.clone(), document.country.clone(), language.clone());

        if !text.chars().any(char::is_alphabetic) {
            debug!(document_id = %document.id, "Document has no text to analyze");
            return Ok(analysis);
        }

        // 1. Entities
        let entities = self.recognizer.recognize(document, &language)?;

        // 2. Actions
        let sentences = sentence_spans(text);
        let tokens = tokenize(text);
        let actions = self.extractor.extract(&document.id, text, &tokens, &sentences);
        if actions.is_empty() {
            debug!(document_id = %document.id, "No predicates found");
        }

        // 3. Roles
        let assignment = self
            .assigner
            .assign(&document.id, text, &sentences, &entities, &actions);

        debug!(
            document_id = %document.id,
            language = %language,
            entities = entities.len(),
            actions = actions.len(),
            relations = assignment.relations.len(),
            ambiguities = assignment.ambiguities,
            "Document analyzed"
        );

        analysis.entities = entities;
        analysis.actions = actions;
        analysis.relations = assignment.relations;
        analysis.ambiguities_resolved = assignment.ambiguities;
        Ok(analysis)
    }
}
