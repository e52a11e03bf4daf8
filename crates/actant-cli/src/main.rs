//! Actant CLI - narrative role analysis from the command line.

use actant_cli::commands;
use actant_cli::{load_config, Cli, Command, Formatter};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter = Formatter::new(cli.format, !cli.no_color);
    if let Err(e) = run(cli, &formatter).await {
        eprintln!("{}", formatter.error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli, formatter: &Formatter) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Analyze(args) => {
            let config = load_config(config_path).context("could not load configuration")?;
            let corpus = args.corpus.display().to_string();
            commands::execute_analyze(args, config, formatter)
                .await
                .with_context(|| format!("analysis of {} failed", corpus))?;
        }
        Command::Inspect(args) => {
            let config = load_config(config_path).context("could not load configuration")?;
            commands::execute_inspect(args, config, formatter).context("inspect failed")?;
        }
        Command::Validate(args) => {
            let config = load_config(config_path).context("could not load configuration")?;
            commands::execute_validate(args, config, formatter).context("validation failed")?;
        }
        Command::InitConfig(args) => {
            commands::execute_init_config(args, formatter).context("init-config failed")?;
        }
    }

    Ok(())
}
