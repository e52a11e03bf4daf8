//! Output formatting for the CLI.

use crate::error::Result;
use actant_aggregator::Report;
use actant_domain::{ActantRole, DocumentAnalysis};
use colored::*;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Characters of evidence shown in relation tables.
const EVIDENCE_PREVIEW: usize = 60;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format one document's analysis.
    pub fn format_analysis(&self, analysis: &DocumentAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
            OutputFormat::Table => Ok(self.format_analysis_tables(analysis)),
            OutputFormat::Quiet => Ok(analysis
                .relations
                .iter()
                .filter_map(|r| {
                    let entity = analysis.entity(r.entity_id)?;
                    let action = analysis.action(r.action_id)?;
                    Some(format!("{}\t{}\t{}", entity.normalized_form, r.role, action.surface_form))
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_analysis_tables(&self, analysis: &DocumentAnalysis) -> String {
        let mut sections = vec![format!(
            "Document {} ({}, {})",
            analysis.document_id, analysis.country, analysis.language
        )];

        if analysis.entities.is_empty() {
            sections.push(self.colorize("No entities found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Surface", "Normalized", "Type"]);
            for entity in &analysis.entities {
                builder.push_record([
                    entity.id.to_string(),
                    entity.surface_form.clone(),
                    entity.normalized_form.clone(),
                    entity.entity_type.to_string(),
                ]);
            }
            sections.push(styled(builder));
        }

        if analysis.actions.is_empty() {
            sections.push(self.colorize("No actions found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Surface", "Lemma", "Type"]);
            for action in &analysis.actions {
                builder.push_record([
                    action.id.to_string(),
                    action.surface_form.clone(),
                    action.lemma.clone(),
                    action.action_type.to_string(),
                ]);
            }
            sections.push(styled(builder));
        }

        if !analysis.relations.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Entity", "Role", "Action", "Confidence", "Evidence"]);
            for relation in &analysis.relations {
                let entity = analysis
                    .entity(relation.entity_id)
                    .map(|e| e.normalized_form.clone())
                    .unwrap_or_else(|| relation.entity_id.to_string());
                let action = analysis
                    .action(relation.action_id)
                    .map(|a| a.surface_form.clone())
                    .unwrap_or_else(|| relation.action_id.to_string());
                builder.push_record([
                    entity,
                    relation.role.to_string(),
                    action,
                    format!("{:.2}", relation.confidence.value()),
                    preview(&relation.evidence, EVIDENCE_PREVIEW),
                ]);
            }
            sections.push(styled(builder));
        }

        sections.join("\n\n")
    }

    /// Format a run report.
    pub fn format_report(&self, report: &Report) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_tables(report)),
            OutputFormat::Quiet => Ok(report.run_id.clone()),
        }
    }

    fn format_report_tables(&self, report: &Report) -> String {
        let mut sections = vec![report.metrics.summary()];

        if report.entity_frequencies.is_empty() {
            sections.push(self.colorize("No entities found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Type", "Entity", "Mentions", "Documents"]);
            for (entity_type, rows) in &report.top_entities {
                for row in rows {
                    builder.push_record([
                        entity_type.clone(),
                        row.normalized_form.clone(),
                        row.mentions.to_string(),
                        row.documents.to_string(),
                    ]);
                }
            }
            sections.push(styled(builder));
        }

        if !report.action_distribution.global.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Action", "Count"]);
            for (action_type, count) in &report.action_distribution.global {
                builder.push_record([action_type.clone(), count.to_string()]);
            }
            sections.push(styled(builder));
        }

        if !report.role_heatmap.countries.is_empty() {
            let mut builder = Builder::default();
            let mut header = vec!["Country".to_string()];
            header.extend(ActantRole::ALL.iter().map(|r| r.to_string()));
            builder.push_record(header);
            for (country, cells) in report.role_heatmap.countries.iter().zip(&report.role_heatmap.cells) {
                let mut row = vec![country.clone()];
                row.extend(cells.iter().map(|c| c.to_string()));
                builder.push_record(row);
            }
            sections.push(styled(builder));
        }

        sections.join("\n\n")
    }

    /// Format corpus languages and their document counts.
    pub fn format_languages(&self, languages: &BTreeMap<String, usize>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(languages)?),
            OutputFormat::Quiet => Ok(languages.keys().cloned().collect::<Vec<_>>().join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Language", "Documents"]);
                for (language, count) in languages {
                    builder.push_record([language.clone(), count.to_string()]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
