//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::output::{Formatter, OutputFormat};
use actant_pipeline::{Pipeline, PipelineConfig};

/// Apply command-line overrides to the loaded configuration.
pub fn apply_overrides(config: &mut PipelineConfig, args: &AnalyzeArgs) {
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
    if let Some(workers) = args.workers {
        config.pipeline.max_concurrent_documents = workers;
    }
    if let Some(min_length) = args.min_length {
        config.pipeline.min_text_length = min_length;
    }
    if let Some(top) = args.top {
        config.pipeline.top_n = top;
    }
    if let Some(mapping) = &args.country_mapping {
        config.pipeline.country_mapping = Some(mapping.clone());
    }
    if args.no_strict {
        config.pipeline.strict_coverage = false;
    }
}

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, mut config: PipelineConfig, formatter: &Formatter) -> Result<()> {
    apply_overrides(&mut config, &args);
    let pipeline = Pipeline::new(config)?;

    let outcome = pipeline.run_dir(&args.corpus).await?;
    let report = pipeline.write_report(&outcome)?;

    println!("{}", formatter.format_report(&report)?);
    if formatter.format() == OutputFormat::Table {
        println!();
        println!(
            "{}",
            formatter.success(&format!(
                "Report written to {}",
                pipeline.config().output.path.display()
            ))
        );
        if outcome.metrics.total_failed() > 0 {
            println!(
                "{}",
                formatter.warning(&format!("{} document(s) skipped after errors", outcome.metrics.total_failed()))
            );
        }
    }

    Ok(())
}
