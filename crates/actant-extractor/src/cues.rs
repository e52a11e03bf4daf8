//! Role cue phrases

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::text::term_script;
use actant_domain::{ActantRole, Script, Span};

const BUILTIN_CUES: &[(&str, ActantRole, f64)] = &[
    // Motivation
    ("on behalf of", ActantRole::Sender, 0.9),
    ("at the invitation of", ActantRole::Sender, 0.9),
    ("at the request of", ActantRole::Sender, 0.9),
    ("initiated by", ActantRole::Sender, 0.9),
    ("proposed by", ActantRole::Sender, 0.9),
    ("in response to", ActantRole::Sender, 0.8),
    ("under the leadership of", ActantRole::Sender, 0.85),
    ("in order to", ActantRole::Sender, 0.6),
    // Benefit
    ("for the benefit of", ActantRole::Receiver, 0.9),
    ("to benefit", ActantRole::Receiver, 0.85),
    ("in favor of", ActantRole::Receiver, 0.85),
    ("in favour of", ActantRole::Receiver, 0.85),
    ("to help", ActantRole::Receiver, 0.8),
    ("for", ActantRole::Receiver, 0.6),
    ("to", ActantRole::Receiver, 0.5),
    // Support
    ("with the support of", ActantRole::Helper, 0.9),
    ("supported by", ActantRole::Helper, 0.9),
    ("with the help of", ActantRole::Helper, 0.9),
    ("with the assistance of", ActantRole::Helper, 0.9),
    ("assisted by", ActantRole::Helper, 0.9),
    ("together with", ActantRole::Helper, 0.85),
    ("with", ActantRole::Helper, 0.5),
    // Adversity
    ("despite", ActantRole::Opponent, 0.9),
    ("in spite of", ActantRole::Opponent, 0.9),
    ("against", ActantRole::Opponent, 0.85),
    ("opposed by", ActantRole::Opponent, 0.9),
    ("opposition from", ActantRole::Opponent, 0.9),
    ("resisted by", ActantRole::Opponent, 0.9),
    ("criticism from", ActantRole::Opponent, 0.85),
    // Chinese
    ("代表", ActantRole::Sender, 0.85),
    ("应", ActantRole::Sender, 0.6),
    ("为了", ActantRole::Receiver, 0.7),
    ("为", ActantRole::Receiver, 0.6),
    ("在支持下", ActantRole::Helper, 0.9),
    ("与", ActantRole::Helper, 0.5),
    ("同", ActantRole::Helper, 0.5),
    ("反对", ActantRole::Opponent, 0.85),
    ("尽管", ActantRole::Opponent, 0.85),
];

/// Articles and possessives allowed between a cue and its entity
const DETERMINERS: &[&str] = &["the", "a", "an", "its", "their", "his", "her", "our"];

/// A phrase marking the role of the entity right after it
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Phrase (lowercased for Latin script)
    pub phrase: String,
    /// Role the phrase signals
    pub role: ActantRole,
    /// Strength in (0, 1]
    pub strength: f64,
    han: bool,
}

/// Cue phrases, longest first
#[derive(Debug, Clone, Default)]
pub struct CueTable {
    cues: Vec<Cue>,
}

impl CueTable {
    /// The built-in bilingual cues
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (phrase, role, strength) in BUILTIN_CUES {
            table.push(phrase, *role, *strength);
        }
        table
    }

    /// Built-in cues extended (or overridden) by the configured ones
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        let mut table = Self::builtin();
        for cue in &config.cues {
            let role = cue
                .role
                .parse::<ActantRole>()
                .map_err(|e| ExtractorError::InvalidLexicon(format!("cue '{}': {}", cue.phrase, e)))?;
            if cue.phrase.trim().is_empty() || !(cue.strength > 0.0 && cue.strength <= 1.0) {
                return Err(ExtractorError::InvalidLexicon(format!(
                    "cue '{}' needs a phrase and a strength in (0, 1]",
                    cue.phrase
                )));
            }
            table.push(&cue.phrase, role, cue.strength);
        }
        Ok(table)
    }

    fn push(&mut self, phrase: &str, role: ActantRole, strength: f64) {
        let han = term_script(phrase) == Script::Han;
        let phrase = if han {
            phrase.trim().to_string()
        } else {
            phrase.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
        };

        self.cues.retain(|c| c.phrase != phrase);
        self.cues.push(Cue { phrase, role, strength, han });
        self.cues
            .sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()).then(a.phrase.cmp(&b.phrase)));
    }

    /// Number of cues
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cue ending right before `entity` inside `segment`
    ///
    /// A Latin cue may be followed by one determiner ("for the Project") and
    /// must start on a word boundary.
    pub fn find(&self, text: &str, segment: Span, entity: Span) -> Option<&Cue> {
        if segment.start > entity.start {
            return None;
        }
        let prefix = text.get(segment.start..entity.start)?.trim_end();
        let lowered = prefix.to_lowercase();
        let latin_prefix = normalize_spaces(strip_trailing_determiner(&lowered));

        self.cues.iter().find(|cue| {
            if cue.han {
                prefix.ends_with(cue.phrase.as_str())
            } else {
                latin_prefix
                    .strip_suffix(cue.phrase.as_str())
                    .is_some_and(|before| before.chars().last().is_none_or(|c| !c.is_alphanumeric()))
            }
        })
    }
}

fn strip_trailing_determiner(prefix: &str) -> &str {
    for determiner in DETERMINERS {
        if let Some(rest) = prefix.strip_suffix(determiner) {
            if rest.chars().last().is_some_and(char::is_whitespace) {
                return rest.trim_end();
            }
        }
    }
    prefix
}

fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
