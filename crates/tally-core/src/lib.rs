//! Tally Core Library
//!
//! Shared functionality for the Tally financial insight tool:
//! - Financial record model, validation and period filtering
//! - JSON and CSV record import
//! - Multi-agent analysis engine (insights, alerts, suggestions, summaries)
//! - Engine configuration with embedded defaults

pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;

pub use config::{EngineConfig, SummaryConfig};
pub use error::{Error, Result};
pub use import::{load_file, parse_csv, parse_json, RecordFormat};
pub use insights::{AgentEngine, AgentId, Roster};
pub use models::{
    filter_period, validate, Category, Department, FinancialRecord, Metrics, Period, Quarter,
};
