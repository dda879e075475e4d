//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Multi-agent financial insights
#[derive(Parser)]
#[command(name = "tally")]
#[command(
    about = "Budget variance, risk and performance insights for departmental records",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to the data dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which records to analyze
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Record file (.json or .csv)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Only analyze one period (e.g. 2024-Q1); by default every record is summed
    #[arg(short, long)]
    pub period: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show ranked insights from every agent
    Analyze {
        #[command(flatten)]
        records: RecordArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show alerts, most urgent first
    Alerts {
        #[command(flatten)]
        records: RecordArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Suggest follow-up questions
    Suggest {
        #[command(flatten)]
        records: RecordArgs,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Show the executive summary
    Summary {
        #[command(flatten)]
        records: RecordArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export the full analysis (insights, alerts, suggestions, summary) as JSON
    Report {
        #[command(flatten)]
        records: RecordArgs,

        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the agents, with their activity if a record file is given
    Agents {
        /// Record file (.json or .csv)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only analyze one period (e.g. 2024-Q1)
        #[arg(short, long, requires = "file")]
        period: Option<String>,
    },

    /// Show engine configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Show the path where a config override should be placed
    Path,
}
