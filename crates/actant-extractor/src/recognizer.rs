//! Entity recognition strategies
//!
//! Two interchangeable strategies sit behind [`Recognizer`]:
//!
//! - [`StatisticalRecognizer`]: per-language named-entity models whose labels
//!   are translated into the four entity types; languages without a model fall
//!   through to the rule-based path
//! - [`RuleBasedRecognizer`]: gazetteer matches plus person/organization/project
//!   heuristics, always available for Latin script and for any script the
//!   gazetteer has terms in
//!
//! Both resolve overlapping candidates the same way: longest span wins, then
//! the earliest start.

use crate::canonical::CanonicalTable;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::gazetteer::{is_plausible_entity, pattern_candidates, Candidate, CandidateSource, Gazetteer};
use crate::text::{detect_script, floor_char_boundary};
use actant_domain::traits::{EntityRecognizer, NerModel, NerModelProvider, NerSpan};
use actant_domain::{Document, DocumentId, Entity, EntityId, EntityType, Script, Span};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Translate a model label into an entity type; unmapped labels are discarded
pub fn map_label(label: &str) -> Option<EntityType> {
    match label.trim().to_ascii_uppercase().as_str() {
        "GPE" | "LOC" | "COUNTRY" => Some(EntityType::Country),
        "ORG" | "ORGANIZATION" => Some(EntityType::Organization),
        "PERSON" | "PER" => Some(EntityType::Person),
        "FAC" | "PROJECT" => Some(EntityType::Project),
        _ => None,
    }
}

/// Keep the longest candidate among overlapping ones (earliest start on ties)
/// and return the survivors in text order
pub(crate) fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.retain(|c| !c.span.is_empty());
    candidates.sort_by(|a, b| {
        b.span
            .len()
            .cmp(&a.span.len())
            .then(a.span.start.cmp(&b.span.start))
            .then(a.source.cmp(&b.source))
            .then(a.entity_type.cmp(&b.entity_type))
    });

    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.iter().all(|k| !k.span.overlaps(&candidate.span)) {
            kept.push(candidate);
        }
    }
    kept.sort_by_key(|c| c.span.start);
    kept
}

fn build_entities(
    text: &str,
    document_id: &DocumentId,
    candidates: Vec<Candidate>,
    canonical: &CanonicalTable,
) -> Vec<Entity> {
    candidates
        .into_iter()
        .filter_map(|c| c.span.slice(text).map(|surface| (c, surface)))
        .enumerate()
        .map(|(i, (c, surface))| Entity {
            id: EntityId(i as u32),
            surface_form: surface.to_string(),
            normalized_form: canonical.normalize(surface),
            entity_type: c.entity_type,
            span: c.span,
            document_id: document_id.clone(),
        })
        .collect()
}

fn canonical_table(config: &ExtractorConfig, gazetteer: &Gazetteer) -> CanonicalTable {
    let mut table = if config.use_builtin_gazetteer {
        CanonicalTable::builtin()
    } else {
        CanonicalTable::new()
    };
    for (variant, canonical) in &config.aliases {
        table.insert(variant, canonical);
    }
    for term in gazetteer.terms() {
        table.register(&term.term);
    }
    table
}

/// Gazetteer and heuristic recognizer
#[derive(Debug, Clone)]
pub struct RuleBasedRecognizer {
    gazetteer: Gazetteer,
    canonical: CanonicalTable,
}

impl RuleBasedRecognizer {
    /// Build from configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        let gazetteer = Gazetteer::from_config(config)?;
        let canonical = canonical_table(config, &gazetteer);
        debug!(
            terms = gazetteer.len(),
            aliases = canonical.len(),
            "Rule-based recognizer ready"
        );
        Ok(Self { gazetteer, canonical })
    }

    /// Compiled gazetteer
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Canonicalization table shared with the statistical path
    pub fn canonical(&self) -> &CanonicalTable {
        &self.canonical
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    type Error = ExtractorError;

    fn recognize(&self, document: &Document, language: &str) -> Result<Vec<Entity>, Self::Error> {
        let text = &document.raw_text;
        let script = detect_script(text);
        if !self.supports(language, script) {
            return Err(ExtractorError::RecognitionFailure {
                document_id: document.id.clone(),
                language: language.to_string(),
                script,
            });
        }

        let mut candidates = self.gazetteer.find_all(text);
        candidates.extend(pattern_candidates(text));
        let resolved = resolve_overlaps(candidates);

        Ok(build_entities(text, &document.id, resolved, &self.canonical))
    }

    fn supports(&self, _language: &str, script: Script) -> bool {
        script == Script::Latin || self.gazetteer.covers(script)
    }
}

/// Model-backed recognizer with a rule-based fallback per language
#[derive(Clone)]
pub struct StatisticalRecognizer {
    models: BTreeMap<String, Arc<dyn NerModel>>,
    fallback: RuleBasedRecognizer,
}

impl fmt::Debug for StatisticalRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatisticalRecognizer")
            .field("languages", &self.models.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StatisticalRecognizer {
    /// Wrap loaded models (language tag -> model)
    pub fn new(models: BTreeMap<String, Arc<dyn NerModel>>, fallback: RuleBasedRecognizer) -> Self {
        let models = models
            .into_iter()
            .map(|(language, model)| (language.to_ascii_lowercase(), model))
            .collect();
        Self { models, fallback }
    }

    /// Languages with a loaded model
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    fn model_for(&self, language: &str) -> Option<&Arc<dyn NerModel>> {
        self.models.get(&language.to_ascii_lowercase())
    }

    fn candidates_from(text: &str, spans: Vec<NerSpan>) -> Vec<Candidate> {
        spans
            .into_iter()
            .filter_map(|span| {
                let entity_type = map_label(&span.label)?;
                let start = floor_char_boundary(text, span.start);
                let end = floor_char_boundary(text, span.end);
                if start >= end {
                    return None;
                }
                let range = Span::new(start, end);
                range
                    .slice(text)
                    .filter(|surface| is_plausible_entity(surface))
                    .map(|_| Candidate {
                        span: range,
                        entity_type,
                        source: CandidateSource::Model,
                    })
            })
            .collect()
    }
}

impl EntityRecognizer for StatisticalRecognizer {
    type Error = ExtractorError;

    fn recognize(&self, document: &Document, language: &str) -> Result<Vec<Entity>, Self::Error> {
        let Some(model) = self.model_for(language) else {
            return self.fallback.recognize(document, language);
        };

        let text = &document.raw_text;
        let spans = model.predict(text);
        debug!(
            document_id = %document.id,
            model = model.name(),
            spans = spans.len(),
            "Model prediction complete"
        );
        let resolved = resolve_overlaps(Self::candidates_from(text, spans));
        Ok(build_entities(text, &document.id, resolved, self.fallback.canonical()))
    }

    fn supports(&self, language: &str, script: Script) -> bool {
        self.model_for(language).is_some() || self.fallback.supports(language, script)
    }
}

/// Recognizer selected by configuration
#[derive(Debug, Clone)]
pub enum Recognizer {
    /// Named-entity models with rule-based fallback
    Statistical(StatisticalRecognizer),
    /// Gazetteer and heuristics only
    RuleBased(RuleBasedRecognizer),
}

impl Recognizer {
    /// Select and initialise the strategy
    ///
    /// Models are loaded once here. With `use_statistical_ner` set but no
    /// provider, or no configured models, the rule-based path is used.
    pub fn from_config(
        config: &ExtractorConfig,
        provider: Option<&dyn NerModelProvider>,
    ) -> Result<Self, ExtractorError> {
        let rule_based = RuleBasedRecognizer::from_config(config)?;

        if !config.use_statistical_ner {
            return Ok(Recognizer::RuleBased(rule_based));
        }
        let Some(provider) = provider else {
            warn!("Statistical recognition requested but no model provider is available; using rule-based recognition");
            return Ok(Recognizer::RuleBased(rule_based));
        };
        if config.language_models.is_empty() {
            warn!("Statistical recognition requested but no language models are configured");
            return Ok(Recognizer::RuleBased(rule_based));
        }

        let mut models = BTreeMap::new();
        for (language, identifier) in &config.language_models {
            let model = provider
                .load(identifier)
                .map_err(|e| ExtractorError::Model(format!("{} ({}): {}", identifier, language, e)))?;
            debug!(language = %language, model = %identifier, "Loaded named-entity model");
            models.insert(language.clone(), model);
        }

        Ok(Recognizer::Statistical(StatisticalRecognizer::new(models, rule_based)))
    }

    /// Strategy name for logs and reports
    pub fn strategy(&self) -> &'static str {
        match self {
            Recognizer::Statistical(_) => "statistical",
            Recognizer::RuleBased(_) => "rule-based",
        }
    }
}

impl EntityRecognizer for Recognizer {
    type Error = ExtractorError;

    fn recognize(&self, document: &Document, language: &str) -> Result<Vec<Entity>, Self::Error> {
        match self {
            Recognizer::Statistical(r) => r.recognize(document, language),
            Recognizer::RuleBased(r) => r.recognize(document, language),
        }
    }

    fn supports(&self, language: &str, script: Script) -> bool {
        match self {
            Recognizer::Statistical(r) => r.supports(language, script),
            Recognizer::RuleBased(r) => r.supports(language, script),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedModel(Vec<NerSpan>);

    impl NerModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _text: &str) -> Vec<NerSpan> {
            self.0.clone()
        }
    }

    struct FixedProvider(Vec<NerSpan>);

    impl NerModelProvider for FixedProvider {
        fn load(&self, _identifier: &str) -> Result<Arc<dyn NerModel>, String> {
            Ok(Arc::new(FixedModel(self.0.clone())))
        }
    }

    struct FailingProvider;

    impl NerModelProvider for FailingProvider {
        fn load(&self, identifier: &str) -> Result<Arc<dyn NerModel>, String> {
            Err(format!("{} not installed", identifier))
        }
    }

    fn span(start: usize, end: usize, label: &str) -> NerSpan {
        NerSpan { start, end, label: label.to_string(), score: 0.9 }
    }

    fn candidate(start: usize, end: usize) -> Candidate {
        Candidate {
            span: Span::new(start, end),
            entity_type: EntityType::Project,
            source: CandidateSource::Gazetteer,
        }
    }

    #[test]
    fn test_label_map() {
        assert_eq!(map_label("GPE"), Some(EntityType::Country));
        assert_eq!(map_label("loc"), Some(EntityType::Country));
        assert_eq!(map_label("ORG"), Some(EntityType::Organization));
        assert_eq!(map_label("PER"), Some(EntityType::Person));
        assert_eq!(map_label("FAC"), Some(EntityType::Project));
        assert_eq!(map_label("DATE"), None);
        assert_eq!(map_label("MONEY"), None);
    }

    #[test]
    fn test_resolve_overlaps_longest_then_earliest() {
        let kept = resolve_overlaps(vec![
            candidate(9, 24),
            candidate(0, 24),
            candidate(30, 35),
            candidate(32, 37),
        ]);
        let spans: Vec<Span> = kept.iter().map(|c| c.span).collect();
        assert_eq!(spans, vec![Span::new(0, 24), Span::new(30, 35)]);
    }

    #[test]
    fn test_rule_based_rejects_uncovered_script() {
        let recognizer = RuleBasedRecognizer::from_config(&ExtractorConfig::default()).unwrap();
        let document = Document::new("ru-1", "Россия и Китай подписали соглашение.");
        let err = recognizer.recognize(&document, "ru").unwrap_err();
        assert!(matches!(err, ExtractorError::RecognitionFailure { script: Script::Cyrillic, .. }));
    }

    #[test]
    fn test_configured_gazetteer_extends_script_coverage() {
        let mut config = ExtractorConfig::default();
        config.gazetteers.insert("Country".to_string(), vec!["Россия".to_string()]);
        let recognizer = RuleBasedRecognizer::from_config(&config).unwrap();
        let document = Document::new("ru-1", "Россия и Китай подписали соглашение.");
        let entities = recognizer.recognize(&document, "ru").unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].surface_form, "Россия");
    }

    #[test]
    fn test_normalized_forms_use_aliases() {
        let recognizer = RuleBasedRecognizer::from_config(&ExtractorConfig::default()).unwrap();
        let document = Document::new("d1", "The PRC and Kenya discussed the BRI.");
        let entities = recognizer.recognize(&document, "en").unwrap();
        let normalized: Vec<&str> = entities.iter().map(|e| e.normalized_form.as_str()).collect();
        assert_eq!(normalized, vec!["China", "Kenya", "Belt and Road Initiative"]);
    }

    #[test]
    fn test_statistical_path_maps_labels_and_drops_unknown() {
        let text = "Kenya and the World Bank met in May.";
        let provider = FixedProvider(vec![
            span(0, 5, "GPE"),
            span(14, 24, "ORG"),
            span(32, 35, "DATE"),
        ]);
        let mut config = ExtractorConfig::default();
        config.use_statistical_ner = true;
        config.language_models.insert("en".to_string(), "en_core_web_sm".to_string());

        let recognizer = Recognizer::from_config(&config, Some(&provider)).unwrap();
        assert_eq!(recognizer.strategy(), "statistical");

        let entities = recognizer.recognize(&Document::new("d1", text), "en").unwrap();
        let types: Vec<EntityType> = entities.iter().map(|e| e.entity_type).collect();
        assert_eq!(types, vec![EntityType::Country, EntityType::Organization]);
        assert_eq!(entities[1].surface_form, "World Bank");
    }

    #[test]
    fn test_statistical_falls_back_for_unmodelled_language() {
        let provider = FixedProvider(Vec::new());
        let mut config = ExtractorConfig::default();
        config.use_statistical_ner = true;
        config.language_models.insert("en".to_string(), "en_core_web_sm".to_string());

        let recognizer = Recognizer::from_config(&config, Some(&provider)).unwrap();
        let entities = recognizer
            .recognize(&Document::new("d1", "中国与希腊合作。"), "zh")
            .unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].normalized_form, "China");
        assert_eq!(entities[1].normalized_form, "Greece");
    }

    #[test]
    fn test_model_load_failure_is_an_error() {
        let mut config = ExtractorConfig::default();
        config.use_statistical_ner = true;
        config.language_models.insert("en".to_string(), "missing_model".to_string());
        let err = Recognizer::from_config(&config, Some(&FailingProvider)).unwrap_err();
        assert!(matches!(err, ExtractorError::Model(_)));
    }

    #[test]
    fn test_statistical_without_provider_uses_rule_based() {
        let mut config = ExtractorConfig::default();
        config.use_statistical_ner = true;
        let recognizer = Recognizer::from_config(&config, None).unwrap();
        assert_eq!(recognizer.strategy(), "rule-based");
    }
}
