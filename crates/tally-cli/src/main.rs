//! Tally CLI - Multi-agent financial insights
//!
//! Usage:
//!   tally analyze --file records.csv            Ranked insights
//!   tally alerts --file records.csv --period 2024-Q1
//!   tally summary --file records.json --json    Executive summary
//!   tally report --file records.csv -o out.json Full JSON report

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Analyze { records, json } => commands::cmd_analyze(config, &records, json),
        Commands::Alerts { records, json } => commands::cmd_alerts(config, &records, json),
        Commands::Suggest { records, json } => commands::cmd_suggest(config, &records, json),
        Commands::Summary { records, json } => commands::cmd_summary(config, &records, json),
        Commands::Report { records, output } => {
            commands::cmd_report(config, &records, output.as_deref())
        }
        Commands::Agents { file, period } => {
            commands::cmd_agents(config, file.as_deref(), period.as_deref())
        }
        Commands::Config { action } => match action {
            None | Some(ConfigAction::Show) => commands::cmd_config_show(config),
            Some(ConfigAction::Path) => commands::cmd_config_path(),
        },
    }
}
