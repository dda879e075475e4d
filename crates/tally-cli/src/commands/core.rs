//! Shared utilities for commands
//!
//! This module contains:
//! - `open_engine` - Build the engine from configuration
//! - `load_records` - Load a record file, optionally narrowed to one period

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{filter_period, load_file, AgentEngine, EngineConfig, FinancialRecord, Period};

use crate::cli::RecordArgs;

/// Load configuration and build the engine.
///
/// When a period is given it replaces the configured period label.
pub fn open_engine(config_path: Option<&Path>, period: Option<Period>) -> Result<AgentEngine> {
    let config = EngineConfig::load(config_path).context("Failed to load engine config")?;
    let engine = AgentEngine::from_config(&config).context("Invalid engine config")?;

    Ok(match period {
        Some(period) => engine.with_labels(config.summary.generated_by, period.to_string()),
        None => engine,
    })
}

/// Parse a `--period` value such as "2024-Q1"
pub fn parse_period(period: Option<&str>) -> Result<Option<Period>> {
    period
        .map(|p| p.parse::<Period>().map_err(|e: String| anyhow::anyhow!(e)))
        .transpose()
}

/// Load records from a file, keeping only `period` if given
pub fn load_records(file: &Path, period: Option<Period>) -> Result<Vec<FinancialRecord>> {
    let records = load_file(file)
        .with_context(|| format!("Failed to load records from {}", file.display()))?;

    let records = match period {
        Some(period) => {
            let filtered = filter_period(&records, period);
            tracing::debug!(
                total = records.len(),
                kept = filtered.len(),
                period = %period,
                "Filtered records by period"
            );
            filtered
        }
        None => records,
    };

    if records.is_empty() {
        tracing::warn!("No records to analyze");
    }

    Ok(records)
}

/// Engine and records for a command taking `--file`/`--period`
pub fn prepare(
    config_path: Option<&Path>,
    args: &RecordArgs,
) -> Result<(AgentEngine, Vec<FinancialRecord>)> {
    let period = parse_period(args.period.as_deref())?;
    let engine = open_engine(config_path, period)?;
    let records = load_records(&args.file, period)?;
    Ok((engine, records))
}
