//! CLI command definitions and argument parsing.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Actant - narrative role analysis of official discourse corpora.
#[derive(Debug, Parser)]
#[command(name = "actant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ACTANT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a corpus directory and write the report
    Analyze(AnalyzeArgs),

    /// Analyze a single document and show its entities, actions and roles
    Inspect(InspectArgs),

    /// Check the configuration and, optionally, corpus language coverage
    Validate(ValidateArgs),

    /// Write a default configuration file
    InitConfig(InitConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Corpus directory (.txt with metadata header, .jsonl)
    pub corpus: PathBuf,

    /// Report file (overrides [output].path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Documents analyzed concurrently
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Skip documents whose cleaned text is not longer than this (chars)
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Rows per entity type in the summary
    #[arg(short, long)]
    pub top: Option<usize>,

    /// country_mapping.json with file-name prefixes
    #[arg(long)]
    pub country_mapping: Option<PathBuf>,

    /// Skip documents in uncovered languages instead of aborting
    #[arg(long)]
    pub no_strict: bool,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Text file to analyze (a metadata header is honored)
    #[arg(conflicts_with = "text", required_unless_present = "text")]
    pub file: Option<PathBuf>,

    /// Inline text to analyze
    #[arg(long)]
    pub text: Option<String>,

    /// Language tag (default: detect)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Publishing country
    #[arg(long, default_value = "Unknown")]
    pub country: String,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Corpus directory whose languages must be covered
    pub corpus: Option<PathBuf>,
}

/// Configuration preset.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Tight window, higher confidence floor
    Aggressive,
    /// Wide window, keeps weak relations
    Lenient,
}

/// Arguments for the init-config command.
#[derive(Debug, Parser)]
pub struct InitConfigArgs {
    /// Destination (default: ~/.actant/config.toml)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Extractor preset
    #[arg(long, value_enum, default_value = "default")]
    pub preset: PresetArg,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl From<PresetArg> for actant_extractor::ExtractorConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => actant_extractor::ExtractorConfig::default(),
            PresetArg::Aggressive => actant_extractor::ExtractorConfig::aggressive(),
            PresetArg::Lenient => actant_extractor::ExtractorConfig::lenient(),
        }
    }
}
