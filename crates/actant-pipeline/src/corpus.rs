//! Corpus loading: crawler text files and JSON Lines

use crate::error::PipelineError;
use actant_domain::{Document, DocumentId};
use regex::Regex;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Lines of `key: value` metadata at the top of a crawler text file
pub const METADATA_LINES: usize = 8;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url pattern"));

/// File-name keywords tried when neither metadata nor mapping names a country
const FILENAME_COUNTRIES: &[(&str, &str)] = &[
    ("south_africa", "South_Africa"),
    ("southafrica", "South_Africa"),
    ("china", "China"),
    ("russia", "Russia"),
    ("kazakhstan", "Kazakhstan"),
    ("indonesia", "Indonesia"),
    ("egypt", "Egypt"),
    ("ethiopia", "Ethiopia"),
    ("nigeria", "Nigeria"),
    ("mongolia", "Mongolia"),
    ("serbia", "Serbia"),
    ("uzbekistan", "Uzbekistan"),
    ("morocco", "Morocco"),
    ("tanzania", "Tanzania"),
    ("uganda", "Uganda"),
    ("kenya", "Kenya"),
    ("greece", "Greece"),
    ("pakistan", "Pakistan"),
];

/// Deterministic document id: first 16 bytes of sha256(path), hex encoded
pub fn document_id_for(path: &Path) -> DocumentId {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    DocumentId::new(hex::encode(&digest[..16]))
}

/// Strip HTML tags and URLs, collapse whitespace within lines, drop blank lines
pub fn clean_text(text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(text, "");
    let without_urls = URL.replace_all(&without_tags, "");
    without_urls
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Deserialize)]
struct CountryMappingFile {
    #[serde(default)]
    country_mapping: BTreeMap<String, String>,
}

/// Resolves a document's country from its file name
#[derive(Debug, Clone, Default)]
pub struct CountryResolver {
    prefixes: BTreeMap<String, String>,
}

impl CountryResolver {
    /// Resolver with an explicit prefix table
    pub fn new(prefixes: BTreeMap<String, String>) -> Self {
        Self { prefixes }
    }

    /// Load `{"country_mapping": {prefix: country}}`
    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        let contents = fs::read_to_string(path)?;
        let file: CountryMappingFile = serde_json::from_str(&contents)
            .map_err(|e| PipelineError::Corpus(format!("Invalid country mapping {}: {}", path.display(), e)))?;
        Ok(Self::new(file.country_mapping))
    }

    /// Longest matching prefix, then a keyword scan, then `Unknown`
    pub fn resolve(&self, file_name: &str) -> String {
        let by_prefix = self
            .prefixes
            .iter()
            .filter(|(prefix, _)| file_name.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());
        if let Some((_, country)) = by_prefix {
            return country.clone();
        }

        let lower = file_name.to_lowercase();
        FILENAME_COUNTRIES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, country)| country.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Documents parsed from the file
    Loaded(Vec<Document>),
    /// A JSON Lines file, line by line
    Batch(JsonlBatch),
    /// The file held no usable text
    Filtered,
}

/// Lines of one JSON Lines file, sorted into usable, filtered and failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonlBatch {
    /// Usable documents, in line order
    pub documents: Vec<Document>,
    /// Lines dropped as too short
    pub filtered: usize,
    /// 1-based line number and parse error of each malformed line
    pub failures: Vec<(usize, String)>,
}

/// Result of loading a corpus directory
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    /// Usable documents, in path order
    pub documents: Vec<Document>,
    /// Files or lines dropped as too short or empty
    pub filtered: usize,
    /// Files that could not be read, and malformed JSON lines
    pub failures: Vec<(PathBuf, String)>,
}

impl LoadedCorpus {
    /// Documents seen, usable or not
    pub fn seen(&self) -> usize {
        self.documents.len() + self.filtered + self.failures.len()
    }
}

/// Reads `.txt` and `.jsonl` documents from a directory tree
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    min_text_length: usize,
    countries: CountryResolver,
}

impl CorpusLoader {
    /// Loader dropping documents of at most `min_text_length` chars
    pub fn new(min_text_length: usize, countries: CountryResolver) -> Self {
        Self {
            min_text_length,
            countries,
        }
    }

    /// Load every supported file under `root`, sorted by path
    pub fn load_dir(&self, root: &Path) -> Result<LoadedCorpus, PipelineError> {
        if !root.is_dir() {
            return Err(PipelineError::Corpus(format!("{} is not a directory", root.display())));
        }

        let mut corpus = LoadedCorpus::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| PipelineError::Corpus(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let loaded = match path.extension().and_then(|e| e.to_str()) {
                Some("txt") => self.load_txt(path).map(|doc| match doc {
                    Some(doc) => LoadOutcome::Loaded(vec![doc]),
                    None => LoadOutcome::Filtered,
                }),
                Some("jsonl") => self.load_jsonl(path).map(LoadOutcome::Batch),
                _ => continue,
            };

            match loaded {
                Ok(LoadOutcome::Loaded(docs)) => corpus.documents.extend(docs),
                Ok(LoadOutcome::Batch(batch)) => {
                    corpus.filtered += batch.filtered;
                    for (line, message) in batch.failures {
                        warn!(path = %path.display(), line, error = %message, "Skipping malformed JSON line");
                        corpus
                            .failures
                            .push((path.to_path_buf(), format!("line {}: {}", line, message)));
                    }
                    corpus.documents.extend(batch.documents);
                }
                Ok(LoadOutcome::Filtered) => {
                    debug!(path = %path.display(), "Document filtered");
                    corpus.filtered += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable corpus file");
                    corpus.failures.push((path.to_path_buf(), e.to_string()));
                }
            }
        }

        info!(
            root = %root.display(),
            documents = corpus.documents.len(),
            filtered = corpus.filtered,
            failed = corpus.failures.len(),
            "Corpus loaded"
        );
        Ok(corpus)
    }

    /// Parse one crawler text file; `None` when it holds too little text
    pub fn load_txt(&self, path: &Path) -> Result<Option<Document>, PipelineError> {
        let contents = fs::read_to_string(path)?;
        let lines: Vec<&str> = contents.lines().collect();
        if lines.len() <= METADATA_LINES {
            return Ok(None);
        }

        let metadata: BTreeMap<String, String> = lines[..METADATA_LINES]
            .iter()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
            .collect();

        let text = clean_text(&lines[METADATA_LINES..].join("\n"));
        if !self.long_enough(&text) {
            return Ok(None);
        }

        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let country = metadata
            .get("country")
            .filter(|c| !c.is_empty())
            .cloned()
            .unwrap_or_else(|| self.countries.resolve(&file_name));

        let source = metadata
            .get("final_url")
            .or_else(|| metadata.get("seed_url"))
            .filter(|u| !u.is_empty())
            .cloned()
            .unwrap_or_else(|| path.display().to_string());

        let mut document = Document::new(document_id_for(path), text)
            .with_country(country)
            .with_source(source)
            .with_language(metadata.get("language").cloned().unwrap_or_default());

        let title = metadata
            .get("title")
            .filter(|t| !t.is_empty())
            .cloned()
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()));
        if let Some(title) = title {
            document = document.with_title(title);
        }
        if let Some(date) = metadata.get("date").filter(|d| !d.is_empty()) {
            document = document.with_timestamp(date.clone());
        }
        Ok(Some(document))
    }

    /// Parse a JSON Lines file, one document per line
    ///
    /// Lines without an `id` get `<path id>-<line>`; missing countries are
    /// resolved from the file name. A malformed line is recorded in the
    /// batch and the following lines are still read; only an unreadable
    /// file is an error.
    pub fn load_jsonl(&self, path: &Path) -> Result<JsonlBatch, PipelineError> {
        let contents = fs::read_to_string(path)?;
        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let base_id = document_id_for(path);

        let mut batch = JsonlBatch::default();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_number = index + 1;
            let mut document = match parse_jsonl_line(line, &format!("{}-{}", base_id, line_number)) {
                Ok(document) => document,
                Err(e) => {
                    batch.failures.push((line_number, e.to_string()));
                    continue;
                }
            };

            document.raw_text = clean_text(&document.raw_text);
            if !self.long_enough(&document.raw_text) {
                batch.filtered += 1;
                continue;
            }
            if document.country.is_empty() || document.country == "Unknown" {
                document.country = self.countries.resolve(&file_name);
            }
            batch.documents.push(document);
        }
        Ok(batch)
    }

    /// Documents must be longer than `min_text_length` chars
    fn long_enough(&self, text: &str) -> bool {
        text.chars().count() > self.min_text_length
    }
}

fn parse_jsonl_line(line: &str, default_id: &str) -> Result<Document, serde_json::Error> {
    let mut value: serde_json::Value = serde_json::from_str(line)?;
    if let Some(object) = value.as_object_mut() {
        object
            .entry("id")
            .or_insert_with(|| serde_json::Value::String(default_id.to_string()));
    }
    serde_json::from_value(value)
}
