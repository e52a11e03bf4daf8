//! Configuration for the Extractor

use actant_domain::{ActantRole, ActionType, EntityType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra cue phrase attaching a role to the entity that follows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueConfig {
    /// Phrase that must end right before the entity, e.g. "with the backing of"
    pub phrase: String,

    /// Role name (Subject, Object, Sender, Receiver, Helper, Opponent)
    pub role: String,

    /// Cue strength in (0, 1]
    #[serde(default = "default_cue_strength")]
    pub strength: f64,
}

fn default_cue_strength() -> f64 {
    0.8
}

/// Configuration for the Extractor
///
/// Lexicon, gazetteer, alias and cue tables extend the built-in tables rather
/// than replace them, unless the matching `use_builtin_*` switch is turned off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Prefer the statistical named-entity path where a model is configured
    #[serde(default)]
    pub use_statistical_ner: bool,

    /// Language tag -> model identifier for the statistical path
    #[serde(default)]
    pub language_models: BTreeMap<String, String>,

    /// Maximum byte distance between an entity and an action phrase
    #[serde(default = "default_proximity_window")]
    pub proximity_window: usize,

    /// Relations scoring below this are dropped
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Multiplier applied when entity and action sit in different sentences
    #[serde(default = "default_cross_sentence_penalty")]
    pub cross_sentence_penalty: f64,

    /// Maximum number of tokens between the parts of a gapped lexicon pattern
    #[serde(default = "default_max_pattern_gap")]
    pub max_pattern_gap: usize,

    /// Lemma (or gapped pattern "sign ... agreement") -> action category
    #[serde(default)]
    pub action_taxonomy: BTreeMap<String, String>,

    /// Entity type -> extra gazetteer terms
    #[serde(default)]
    pub gazetteers: BTreeMap<String, Vec<String>>,

    /// Surface variant -> canonical form
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Extra role cue phrases
    #[serde(default)]
    pub cues: Vec<CueConfig>,

    /// Load the built-in bilingual action lexicon
    #[serde(default = "default_true")]
    pub use_builtin_lexicon: bool,

    /// Load the built-in bilingual gazetteer and alias table
    #[serde(default = "default_true")]
    pub use_builtin_gazetteer: bool,
}

fn default_proximity_window() -> usize {
    120
}

fn default_min_confidence() -> f64 {
    0.05
}

fn default_cross_sentence_penalty() -> f64 {
    0.5
}

fn default_max_pattern_gap() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            use_statistical_ner: false,
            language_models: BTreeMap::new(),
            proximity_window: default_proximity_window(),
            min_confidence: default_min_confidence(),
            cross_sentence_penalty: default_cross_sentence_penalty(),
            max_pattern_gap: default_max_pattern_gap(),
            action_taxonomy: BTreeMap::new(),
            gazetteers: BTreeMap::new(),
            aliases: BTreeMap::new(),
            cues: Vec::new(),
            use_builtin_lexicon: true,
            use_builtin_gazetteer: true,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: tight window, higher confidence floor
    pub fn aggressive() -> Self {
        Self {
            proximity_window: 60,
            min_confidence: 0.2,
            cross_sentence_penalty: 0.25,
            max_pattern_gap: 2,
            ..Self::default()
        }
    }

    /// Lenient preset: wide window, keeps weak relations
    pub fn lenient() -> Self {
        Self {
            proximity_window: 200,
            min_confidence: 0.02,
            cross_sentence_penalty: 0.75,
            max_pattern_gap: 6,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.proximity_window == 0 {
            return Err("proximity_window must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!("min_confidence {} out of range [0.0, 1.0]", self.min_confidence));
        }
        if !(0.0..=1.0).contains(&self.cross_sentence_penalty) {
            return Err(format!(
                "cross_sentence_penalty {} out of range [0.0, 1.0]",
                self.cross_sentence_penalty
            ));
        }
        if self.max_pattern_gap == 0 || self.max_pattern_gap > 12 {
            return Err("max_pattern_gap must be between 1 and 12".to_string());
        }
        for (lemma, category) in &self.action_taxonomy {
            if lemma.trim().is_empty() {
                return Err("action_taxonomy contains an empty lemma".to_string());
            }
            category.parse::<ActionType>()?;
        }
        for (entity_type, terms) in &self.gazetteers {
            entity_type.parse::<EntityType>()?;
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(format!("gazetteer '{}' contains an empty term", entity_type));
            }
        }
        for cue in &self.cues {
            cue.role.parse::<ActantRole>()?;
            if cue.phrase.trim().is_empty() {
                return Err("cue phrase must not be empty".to_string());
            }
            if !(cue.strength > 0.0 && cue.strength <= 1.0) {
                return Err(format!("cue '{}' strength {} out of range (0.0, 1.0]", cue.phrase, cue.strength));
            }
        }
        for (language, model) in &self.language_models {
            if model.trim().is_empty() {
                return Err(format!("language_models['{}'] is empty", language));
            }
        }
        Ok(())
    }

    /// Model identifier configured for a language
    pub fn model_for(&self, language: &str) -> Option<&str> {
        self.language_models
            .get(language)
            .or_else(|| self.language_models.get(&language.to_ascii_lowercase()))
            .map(String::as_str)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::aggressive().validate().is_ok());
        assert!(ExtractorConfig::lenient().validate().is_ok());
        assert!(ExtractorConfig::aggressive().proximity_window < ExtractorConfig::lenient().proximity_window);
    }

    #[test]
    fn test_invalid_window() {
        let mut config = ExtractorConfig::default();
        config.proximity_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_taxonomy_category() {
        let mut config = ExtractorConfig::default();
        config.action_taxonomy.insert("pledge".to_string(), "charity".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_gazetteer_type() {
        let mut config = ExtractorConfig::default();
        config.gazetteers.insert("city".to_string(), vec!["Mombasa".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_cue_strength() {
        let mut config = ExtractorConfig::default();
        config.cues.push(CueConfig {
            phrase: "backed by".to_string(),
            role: "Helper".to_string(),
            strength: 0.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml(
            r#"
            proximity_window = 80

            [action_taxonomy]
            "sign ... memorandum" = "cooperation"

            [gazetteers]
            Project = ["Mombasa-Nairobi Standard Gauge Railway"]
            "#,
        )
        .unwrap();

        assert_eq!(config.proximity_window, 80);
        assert_eq!(config.min_confidence, 0.05);
        assert!(config.use_builtin_lexicon);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ExtractorConfig::lenient();
        config.language_models.insert("en".to_string(), "en_core_web_sm".to_string());
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.proximity_window, parsed.proximity_window);
        assert_eq!(parsed.model_for("en"), Some("en_core_web_sm"));
        assert_eq!(parsed.model_for("EN"), Some("en_core_web_sm"));
    }
}
