//! Action lexicon: lemma, gapped-pattern and keyword tables

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::text::term_script;
use actant_domain::{ActionType, Script};
use std::collections::BTreeMap;

/// Endings a token may add to a lemma stem and still count as that lemma
const INFLECTIONS: &[&str] = &[
    "", "e", "es", "s", "ed", "d", "ing", "ion", "ions", "ation", "ations", "ment", "ments", "er",
    "ers", "ive", "ship", "ships",
];

const BUILTIN_LEMMAS: &[(&str, ActionType)] = &[
    ("cooperate", ActionType::Cooperation),
    ("collaborate", ActionType::Cooperation),
    ("partner", ActionType::Cooperation),
    ("joint", ActionType::Cooperation),
    ("build", ActionType::Construction),
    ("built", ActionType::Construction),
    ("construct", ActionType::Construction),
    ("develop", ActionType::Construction),
    ("establish", ActionType::Construction),
    ("create", ActionType::Construction),
    ("trade", ActionType::Trade),
    ("export", ActionType::Trade),
    ("import", ActionType::Trade),
    ("commerce", ActionType::Trade),
    ("business", ActionType::Trade),
    ("invest", ActionType::Investment),
    ("finance", ActionType::Financing),
    ("fund", ActionType::Financing),
    ("loan", ActionType::Financing),
    ("credit", ActionType::Financing),
    ("lend", ActionType::Financing),
    ("lent", ActionType::Financing),
    ("visit", ActionType::Diplomatic),
    ("meet", ActionType::Diplomatic),
    ("met", ActionType::Diplomatic),
    ("talk", ActionType::Diplomatic),
    ("dialogue", ActionType::Diplomatic),
    ("communicate", ActionType::Diplomatic),
    ("exchange", ActionType::Diplomatic),
    ("discuss", ActionType::Diplomatic),
    ("negotiate", ActionType::Diplomatic),
    ("consult", ActionType::Diplomatic),
    ("summit", ActionType::Diplomatic),
];

const BUILTIN_PATTERNS: &[(&str, ActionType)] = &[
    ("sign ... agreement", ActionType::Cooperation),
    ("sign ... memorandum", ActionType::Cooperation),
    ("hold ... talks", ActionType::Diplomatic),
    ("reach ... consensus", ActionType::Diplomatic),
    ("签署 ... 协议", ActionType::Cooperation),
    ("签署 ... 备忘录", ActionType::Cooperation),
];

const BUILTIN_KEYWORDS: &[(&str, ActionType)] = &[
    ("合作", ActionType::Cooperation),
    ("协作", ActionType::Cooperation),
    ("伙伴", ActionType::Cooperation),
    ("联合", ActionType::Cooperation),
    ("共建", ActionType::Cooperation),
    ("建设", ActionType::Construction),
    ("构建", ActionType::Construction),
    ("发展", ActionType::Construction),
    ("建立", ActionType::Construction),
    ("创建", ActionType::Construction),
    ("修建", ActionType::Construction),
    ("贸易", ActionType::Trade),
    ("出口", ActionType::Trade),
    ("进口", ActionType::Trade),
    ("经贸", ActionType::Trade),
    ("商贸", ActionType::Trade),
    ("投资", ActionType::Investment),
    ("融资", ActionType::Financing),
    ("资金", ActionType::Financing),
    ("贷款", ActionType::Financing),
    ("资助", ActionType::Financing),
    ("沟通", ActionType::Diplomatic),
    ("交流", ActionType::Diplomatic),
    ("对话", ActionType::Diplomatic),
    ("讨论", ActionType::Diplomatic),
    ("会谈", ActionType::Diplomatic),
    ("会见", ActionType::Diplomatic),
    ("访问", ActionType::Diplomatic),
    ("峰会", ActionType::Diplomatic),
];

/// Whether a lowercased token is an inflection of `lemma`
///
/// The stem is the lemma without a final `e`; the token must be the lemma
/// itself or the stem followed by one of the known endings.
pub fn lemma_matches(token: &str, lemma: &str) -> bool {
    if token == lemma {
        return true;
    }
    let stem = lemma.strip_suffix('e').unwrap_or(lemma);
    token
        .strip_prefix(stem)
        .is_some_and(|rest| INFLECTIONS.contains(&rest))
}

/// A multi-part lexicon entry such as `sign ... agreement`
#[derive(Debug, Clone, PartialEq)]
pub struct GappedPattern {
    /// Entry as configured
    pub key: String,
    /// Parts in order (lowercased)
    pub parts: Vec<String>,
    /// Words (Latin) or characters (Han) allowed between consecutive parts
    pub max_gap: usize,
    /// Category assigned to matches
    pub action_type: ActionType,
    /// Parts are Han keywords rather than lemmas
    pub han: bool,
}

/// Lemma/pattern/keyword to category mapping
#[derive(Debug, Clone, Default)]
pub struct ActionLexicon {
    lemmas: BTreeMap<String, ActionType>,
    patterns: Vec<GappedPattern>,
    keywords: BTreeMap<String, ActionType>,
}

impl ActionLexicon {
    /// An empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in bilingual lexicon
    pub fn builtin(max_gap: usize) -> Self {
        let mut lexicon = Self::new();
        let entries = BUILTIN_LEMMAS
            .iter()
            .chain(BUILTIN_PATTERNS)
            .chain(BUILTIN_KEYWORDS);
        for (key, action_type) in entries {
            // built-in entries are well formed
            let _ = lexicon.insert(key, *action_type, max_gap);
        }
        lexicon
    }

    /// Built-in lexicon (when enabled) extended by `action_taxonomy`
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        let mut lexicon = if config.use_builtin_lexicon {
            Self::builtin(config.max_pattern_gap)
        } else {
            Self::new()
        };
        for (key, category) in &config.action_taxonomy {
            let action_type = category
                .parse::<ActionType>()
                .map_err(|e| ExtractorError::InvalidLexicon(format!("'{}': {}", key, e)))?;
            lexicon.insert(key, action_type, config.max_pattern_gap)?;
        }
        Ok(lexicon)
    }

    /// Add or replace an entry
    ///
    /// `a ... b` becomes a gapped pattern, a multi-word entry a contiguous
    /// pattern, a Han entry a keyword and anything else a lemma.
    pub fn insert(&mut self, key: &str, action_type: ActionType, max_gap: usize) -> Result<(), ExtractorError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ExtractorError::InvalidLexicon("empty entry".to_string()));
        }
        let han = term_script(key) == Script::Han;

        if key.contains("...") {
            let parts: Vec<String> = key.split("...").map(|p| p.trim().to_lowercase()).collect();
            if parts.len() < 2 || parts.iter().any(|p| p.is_empty() || (!han && p.contains(char::is_whitespace))) {
                return Err(ExtractorError::InvalidLexicon(format!(
                    "'{}': patterns need single-word parts on both sides of '...'",
                    key
                )));
            }
            self.push_pattern(key, parts, max_gap, action_type, han);
        } else if han {
            self.keywords.insert(key.to_string(), action_type);
        } else if key.contains(char::is_whitespace) {
            let parts = key.split_whitespace().map(str::to_lowercase).collect();
            self.push_pattern(key, parts, 0, action_type, false);
        } else {
            self.lemmas.insert(key.to_lowercase(), action_type);
        }
        Ok(())
    }

    fn push_pattern(&mut self, key: &str, parts: Vec<String>, max_gap: usize, action_type: ActionType, han: bool) {
        let pattern = GappedPattern {
            key: key.to_string(),
            parts,
            max_gap,
            action_type,
            han,
        };
        match self.patterns.iter_mut().find(|p| p.parts == pattern.parts) {
            Some(existing) => *existing = pattern,
            None => self.patterns.push(pattern),
        }
    }

    /// Longest lemma the lowercased `token` inflects, with its category
    pub fn classify(&self, token: &str) -> Option<(&str, ActionType)> {
        self.lemmas
            .iter()
            .filter(|(lemma, _)| lemma_matches(token, lemma))
            .max_by(|a, b| a.0.len().cmp(&b.0.len()).then(b.0.cmp(a.0)))
            .map(|(lemma, action_type)| (lemma.as_str(), *action_type))
    }

    /// Gapped and multi-word patterns
    pub fn patterns(&self) -> &[GappedPattern] {
        &self.patterns
    }

    /// Han keywords
    pub fn keywords(&self) -> impl Iterator<Item = (&str, ActionType)> {
        self.keywords.iter().map(|(k, t)| (k.as_str(), *t))
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.lemmas.len() + self.patterns.len() + self.keywords.len()
    }

    /// Whether the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
