//! Document module - the unit of ingestion

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a document
///
/// Upstream collaborators choose the value (a path hash, a URL digest, ...);
/// the engine only requires it to be unique within a run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Writing system of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin alphabet (English, French, Indonesian, ...)
    Latin,
    /// Han characters (Chinese)
    Han,
    /// Cyrillic alphabet (Russian, Serbian, Mongolian, ...)
    Cyrillic,
    /// Arabic script
    Arabic,
    /// Anything else
    Other,
}

impl Script {
    /// All scripts
    pub const ALL: [Script; 5] = [
        Script::Latin,
        Script::Han,
        Script::Cyrillic,
        Script::Arabic,
        Script::Other,
    ];

    /// Script of a single character, or `None` for digits/punctuation/space
    pub fn of_char(c: char) -> Option<Script> {
        if !c.is_alphabetic() {
            return None;
        }
        let script = match c as u32 {
            0x0041..=0x024F | 0x1E00..=0x1EFF => Script::Latin,
            0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF | 0x20000..=0x2A6DF => Script::Han,
            0x0400..=0x052F => Script::Cyrillic,
            0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
            _ => Script::Other,
        };
        Some(script)
    }

    /// Script conventionally used to write a language (BCP 47 tag)
    ///
    /// Region and variant subtags are ignored ("en-US" is "en"), except for
    /// `uz-Cyrl`.
    pub fn of_language(language: &str) -> Script {
        let tag = language.trim().to_ascii_lowercase().replace('_', "-");
        if tag == "uz-cyrl" || tag.starts_with("uz-cyrl-") {
            return Script::Cyrillic;
        }
        let primary = tag.split('-').next().unwrap_or_default();
        match primary {
            "zh" => Script::Han,
            "ru" | "sr" | "mn" | "kk" | "ky" | "tg" | "bg" | "uk" | "be" | "mk" => Script::Cyrillic,
            "ar" | "fa" | "ur" | "ps" => Script::Arabic,
            "en" | "fr" | "es" | "pt" | "de" | "it" | "nl" | "ro" | "pl" | "cs" | "sk" | "hu" | "hr"
            | "sl" | "sv" | "da" | "no" | "nb" | "fi" | "et" | "lv" | "lt" | "id" | "ms" | "sw"
            | "uz" | "tr" | "vi" | "tl" | "ha" | "yo" | "so" | "af" => Script::Latin,
            _ => Script::Other,
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Han => "han",
            Script::Cyrillic => "cyrillic",
            Script::Arabic => "arabic",
            Script::Other => "other",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single official discourse document
///
/// Immutable once ingested: the engine reads it and derives entities,
/// actions and relations from it, but never changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,

    /// Country whose official source published the document
    #[serde(default = "default_country")]
    pub country: String,

    /// URL or path the text was obtained from
    #[serde(default)]
    pub source_url: String,

    /// Language tag (ISO 639-1); empty or `auto` means detect from text
    #[serde(default)]
    pub language: String,

    /// Cleaned, segmented text
    #[serde(alias = "text")]
    pub raw_text: String,

    /// Publication date as delivered by the crawler (free-form)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Title, when the crawler captured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

fn default_country() -> String {
    "Unknown".to_string()
}

impl Document {
    /// Create a document with unknown country and auto-detected language
    pub fn new(id: impl Into<DocumentId>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            country: default_country(),
            source_url: String::new(),
            language: String::new(),
            raw_text: raw_text.into(),
            timestamp: None,
            title: None,
        }
    }

    /// Set the publishing country
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Set the language tag
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the source URL
    pub fn with_source(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = source_url.into();
        self
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Whether the language tag asks for detection
    pub fn needs_language_detection(&self) -> bool {
        let tag = self.language.trim();
        tag.is_empty() || tag.eq_ignore_ascii_case("auto")
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
