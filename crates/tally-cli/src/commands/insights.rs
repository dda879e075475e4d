//! Insight, alert and suggestion command implementations

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tally_core::insights::{Alert, Insight, QuerySuggestion, Severity};

use super::{prepare, truncate};
use crate::cli::RecordArgs;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🟢",
    }
}

pub fn cmd_analyze(config: Option<&Path>, args: &RecordArgs, json: bool) -> Result<()> {
    let (engine, records) = prepare(config, args)?;
    let insights = engine.analyze_all(&records)?;

    if json {
        return print_json(&insights);
    }

    println!();
    println!("🔍 Insights ({})", insights.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing stands out in these records.");
        return Ok(());
    }

    for insight in &insights {
        print_insight(insight);
    }

    Ok(())
}

fn print_insight(insight: &Insight) {
    println!();
    println!(
        "   {} [{}] {}",
        severity_icon(insight.severity),
        insight.severity.as_str().to_uppercase(),
        insight.title
    );
    println!("      {}", insight.description);
    println!("      {}", insight.details);
    println!(
        "      {} · {} · {:.0}% confidence",
        insight.agent_id,
        insight.insight_type,
        insight.confidence * 100.0
    );
    for action in insight.action_items.iter().flatten() {
        println!("      → {}", action);
    }
}

pub fn cmd_alerts(config: Option<&Path>, args: &RecordArgs, json: bool) -> Result<()> {
    let (engine, records) = prepare(config, args)?;
    let alerts = engine.alert_all(&records)?;

    if json {
        return print_json(&alerts);
    }

    println!();
    println!("🚨 Alerts ({})", alerts.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if alerts.is_empty() {
        println!("   No alerts. Everything is within tolerance.");
        return Ok(());
    }

    println!(
        "   {:8} │ {:20} │ {:19} │ {}",
        "Priority", "Department", "Agent", "Alert"
    );
    println!("   ─────────┼──────────────────────┼─────────────────────┼──────────────────");
    for alert in &alerts {
        print_alert_row(alert);
    }

    Ok(())
}

fn print_alert_row(alert: &Alert) {
    println!(
        "   {:8} │ {:20} │ {:19} │ {}",
        alert.priority.as_str(),
        truncate(alert.department.as_deref().unwrap_or("-"), 20),
        alert.agent_id.as_str(),
        alert.message
    );
}

pub fn cmd_suggest(config: Option<&Path>, args: &RecordArgs, json: bool) -> Result<()> {
    let (engine, records) = prepare(config, args)?;
    let suggestions = engine.suggest_all(&records)?;

    if json {
        return print_json(&suggestions);
    }

    println!();
    println!("💡 Suggested questions");
    println!("   ─────────────────────────────────────────────────────────────");

    for (i, suggestion) in suggestions.iter().enumerate() {
        print_suggestion(i + 1, suggestion);
    }

    Ok(())
}

fn print_suggestion(n: usize, suggestion: &QuerySuggestion) {
    println!();
    println!("   {}. {}", n, suggestion.query);
    println!("      {}", suggestion.reason);
    println!(
        "      {} · relevance {:.0}% · ~{} insights",
        suggestion.category,
        suggestion.relevance_score * 100.0,
        suggestion.estimated_insights
    );
}
