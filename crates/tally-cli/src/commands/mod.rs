//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `agents` - Roster listing with activity
//! - `config` - Effective config and override path
//! - `core` - Shared utilities (open_engine, load_records)
//! - `insights` - Insight, alert and suggestion commands
//! - `reports` - Executive summary and full JSON report

pub mod agents;
pub mod config;
pub mod core;
pub mod insights;
pub mod reports;

// Re-export command functions for main.rs
pub use agents::*;
pub use config::*;
pub use core::*;
pub use insights::*;
pub use reports::*;

/// Truncate a string to at most `max` characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
