//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::output::Formatter;
use actant_extractor::DocumentAnalyzer;
use actant_pipeline::{check_coverage, corpus_languages, Pipeline, PipelineConfig};

/// Execute the validate command.
pub fn execute_validate(args: ValidateArgs, config: PipelineConfig, formatter: &Formatter) -> Result<()> {
    config.validate()?;
    let analyzer = DocumentAnalyzer::new(config.extractor.clone())?;
    println!(
        "{}",
        formatter.success(&format!("Configuration valid ({} recognizer)", analyzer.recognizer().strategy()))
    );

    let Some(corpus_dir) = args.corpus else {
        return Ok(());
    };

    let pipeline = Pipeline::with_analyzer(config, analyzer);
    let corpus = pipeline.load_corpus(&corpus_dir)?;
    println!(
        "{}",
        formatter.info(&format!(
            "{} document(s) usable, {} filtered, {} unreadable",
            corpus.documents.len(),
            corpus.filtered,
            corpus.failures.len()
        ))
    );

    let languages = corpus_languages(pipeline.analyzer(), &corpus.documents);
    println!("{}", formatter.format_languages(&languages)?);

    check_coverage(pipeline.analyzer(), &corpus.documents)?;
    println!("{}", formatter.success("Every corpus language is covered"));
    Ok(())
}
