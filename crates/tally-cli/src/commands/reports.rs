//! Summary and report command implementations

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::insights::ExecutiveSummary;
use tally_core::insights::scoring::format_amount;

use super::{prepare, print_json};
use crate::cli::RecordArgs;

pub fn cmd_summary(config: Option<&Path>, args: &RecordArgs, json: bool) -> Result<()> {
    let (engine, records) = prepare(config, args)?;
    let summary = engine.summarize(&records)?;

    if json {
        return print_json(&summary);
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ExecutiveSummary) {
    let metrics = &summary.metrics;

    println!();
    println!("📋 Executive Summary");
    println!("   {} · {}", summary.generated_by, summary.period);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total budget:   ${}", format_amount(metrics.total_budget));
    println!("   Total actual:   ${}", format_amount(metrics.total_actual));
    println!("   Variance:       {:+.1}%", metrics.overall_variance);
    println!("   At risk:        {} departments", metrics.departments_at_risk);

    print_section("Key findings", &summary.key_findings);
    print_section("Risks", &summary.risks);
    print_section("Opportunities", &summary.opportunities);
    print_section("Recommendations", &summary.recommendations);
}

fn print_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("   {}:", title);
    for item in items {
        println!("   • {}", item);
    }
}

/// Write the full report as JSON to `output`, or stdout
pub fn cmd_report(config: Option<&Path>, args: &RecordArgs, output: Option<&Path>) -> Result<()> {
    let (engine, records) = prepare(config, args)?;
    let report = engine.report(&records)?;

    let Some(output) = output else {
        return print_json(&report);
    };

    // Check output doesn't already exist
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    let mut file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    file.write_all(json.as_bytes())?;

    println!("✅ Report written to: {}", output.display());
    println!("   Insights: {}", report.insights.len());
    println!("   Alerts: {}", report.alerts.len());
    println!("   Suggestions: {}", report.suggestions.len());

    Ok(())
}
