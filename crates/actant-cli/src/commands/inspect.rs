//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use actant_domain::Document;
use actant_extractor::DocumentAnalyzer;
use actant_pipeline::{clean_text, CorpusLoader, CountryResolver, PipelineConfig};

/// Build the document to inspect from a file or inline text.
pub fn build_document(args: &InspectArgs) -> Result<Document> {
    let mut document = match (&args.file, &args.text) {
        (Some(path), _) => {
            let with_header = if path.extension().is_some_and(|e| e == "txt") {
                CorpusLoader::new(0, CountryResolver::default()).load_txt(path)?
            } else {
                None
            };
            match with_header {
                Some(document) => document,
                None => {
                    let text = std::fs::read_to_string(path)?;
                    Document::new(path.display().to_string(), clean_text(&text))
                }
            }
        }
        (None, Some(text)) => Document::new("inline", text.clone()),
        (None, None) => return Err(CliError::InvalidInput("Provide a file or --text".to_string())),
    };

    if args.country != "Unknown" || document.country.is_empty() {
        document.country = args.country.clone();
    }
    if let Some(language) = &args.language {
        document.language = language.clone();
    }
    Ok(document)
}

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, config: PipelineConfig, formatter: &Formatter) -> Result<()> {
    let analyzer = DocumentAnalyzer::new(config.extractor)?;
    let document = build_document(&args)?;
    let analysis = analyzer.analyze(&document)?;
    println!("{}", formatter.format_analysis(&analysis)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(file: Option<PathBuf>, text: Option<&str>) -> InspectArgs {
        InspectArgs {
            file,
            text: text.map(str::to_string),
            language: None,
            country: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_inline_text() {
        let mut inspect = args(None, Some("Kenya built a port."));
        inspect.country = "Kenya".to_string();
        inspect.language = Some("en".to_string());

        let document = build_document(&inspect).unwrap();
        assert_eq!(document.id.as_str(), "inline");
        assert_eq!(document.country, "Kenya");
        assert_eq!(document.language, "en");
    }

    #[test]
    fn test_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.md");
        std::fs::write(&path, "<b>Greece</b> expanded trade with China.").unwrap();

        let document = build_document(&args(Some(path), None)).unwrap();
        assert_eq!(document.raw_text, "Greece expanded trade with China.");
        assert_eq!(document.country, "Unknown");
    }

    #[test]
    fn test_header_file_keeps_metadata_country() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.txt");
        std::fs::write(
            &path,
            "title: T\ndate: 2024\nseed_url:\nfinal_url:\ncountry: Egypt\nlanguage: en\nsource: x\n---\nEgypt and China signed a memorandum.",
        )
        .unwrap();

        let document = build_document(&args(Some(path), None)).unwrap();
        assert_eq!(document.country, "Egypt");
        assert_eq!(document.raw_text, "Egypt and China signed a memorandum.");
    }
}
