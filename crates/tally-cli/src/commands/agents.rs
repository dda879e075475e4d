//! Agent listing command

use std::path::Path;

use anyhow::Result;

use super::{load_records, open_engine, parse_period, truncate};

/// List roster agents, with activity counts when a record file is given
pub fn cmd_agents(config: Option<&Path>, file: Option<&Path>, period: Option<&str>) -> Result<()> {
    let period = parse_period(period)?;
    let engine = open_engine(config, period)?;
    let profiles = engine.agents();

    let activity = match file {
        Some(file) => {
            let records = load_records(file, period)?;
            Some(engine.activity(&records)?)
        }
        None => None,
    };

    println!();
    println!("🤖 Agents ({})", profiles.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for (i, profile) in profiles.iter().enumerate() {
        println!();
        println!("   {} {} ({})", profile.avatar, profile.name, profile.id);
        println!("      {}", profile.specialty);
        println!("      {}", truncate(profile.personality, 70));

        if let Some(activity) = activity.as_ref().and_then(|a| a.get(i)) {
            println!(
                "      Status: {} · {} insights · {} alerts",
                activity.status, activity.insights, activity.alerts
            );
        }
    }

    Ok(())
}
