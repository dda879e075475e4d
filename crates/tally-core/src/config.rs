//! Engine configuration
//!
//! Controls the summary labels and which agents run, in which order.
//! Scoring thresholds are fixed and not configurable.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or an override in the data dir
//!    (~/.local/share/tally/config/engine.toml) if present
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::insights::AgentId;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Labels stamped on executive summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryConfig {
    pub generated_by: String,
    pub period_label: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            generated_by: "Multi-Agent Analysis".to_string(),
            period_label: "Current Period".to_string(),
        }
    }
}

/// Effective engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    /// Agents to run, in order
    pub roster: Vec<AgentId>,
    pub summary: SummaryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            roster: AgentId::all().to_vec(),
            summary: SummaryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `path`, the data dir override, or the
    /// embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                read_config(path)?
            }
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => read_config(&default_path)?,
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to render config: {}", e)))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("engine.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "Loading engine config");
    fs::read_to_string(path).map_err(|e| Error::Config(format!("Failed to read config: {}", e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    roster: Option<Vec<String>>,
    summary: Option<RawSummary>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    generated_by: Option<String>,
    period_label: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(roster) = raw.roster {
        config.roster = roster
            .iter()
            .map(|name| name.parse::<AgentId>().map_err(Error::Config))
            .collect::<Result<Vec<_>>>()?;
    }

    if let Some(summary) = raw.summary {
        if let Some(generated_by) = summary.generated_by {
            config.summary.generated_by = generated_by;
        }
        if let Some(period_label) = summary.period_label {
            config.summary.period_label = period_label;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            roster = ["risk-advisor"]

            [summary]
            period_label = "FY24 Q2"
            "#,
        )
        .unwrap();

        assert_eq!(config.roster, vec![AgentId::RiskAdvisor]);
        assert_eq!(config.summary.period_label, "FY24 Q2");
        assert_eq!(config.summary.generated_by, "Multi-Agent Analysis");
    }

    #[test]
    fn test_unknown_agent_is_rejected() {
        let err = parse_config(r#"roster = ["budget-analyst", "oracle"]"#).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("oracle")));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            parse_config("roster = ").unwrap_err(),
            Error::Config(_)
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[summary]\ngenerated_by = \"Finance Team\"").unwrap();

        let config = EngineConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.summary.generated_by, "Finance Team");
        assert_eq!(config.roster.len(), 3);
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(EngineConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = EngineConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("risk-advisor"));
        assert_eq!(parse_config(&rendered).unwrap(), config);
    }
}
