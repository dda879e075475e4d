//! Core types for the agent engine outputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the built-in analysis agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentId {
    /// Budget variance detection
    BudgetAnalyst,
    /// Risk scoring
    RiskAdvisor,
    /// Performance scoring and efficiency
    PerformanceAnalyst,
}

impl AgentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentId::BudgetAnalyst => "budget-analyst",
            AgentId::RiskAdvisor => "risk-advisor",
            AgentId::PerformanceAnalyst => "performance-analyst",
        }
    }

    /// All agents in default roster order
    pub fn all() -> &'static [AgentId] {
        &[
            AgentId::BudgetAnalyst,
            AgentId::RiskAdvisor,
            AgentId::PerformanceAnalyst,
        ]
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget-analyst" => Ok(AgentId::BudgetAnalyst),
            "risk-advisor" => Ok(AgentId::RiskAdvisor),
            "performance-analyst" => Ok(AgentId::PerformanceAnalyst),
            _ => Err(format!("Unknown agent: {}", s)),
        }
    }
}

/// Kind of insight an agent produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Risk,
    Opportunity,
    Trend,
    Anomaly,
    Recommendation,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Risk => "risk",
            InsightType::Opportunity => "opportunity",
            InsightType::Trend => "trend",
            InsightType::Anomaly => "anomaly",
            InsightType::Recommendation => "recommendation",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "risk" => Ok(InsightType::Risk),
            "opportunity" => Ok(InsightType::Opportunity),
            "trend" => Ok(InsightType::Trend),
            "anomaly" => Ok(InsightType::Anomaly),
            "recommendation" => Ok(InsightType::Recommendation),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Numeric rank for sorting (higher = more severe)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    /// High and critical insights mark a department as at risk
    pub fn is_elevated(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Kind of alert an agent raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    BudgetRisk,
    VarianceAlert,
    TrendChange,
    DeadlineAlert,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::BudgetRisk => "budget_risk",
            AlertType::VarianceAlert => "variance_alert",
            AlertType::TrendChange => "trend_change",
            AlertType::DeadlineAlert => "deadline_alert",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Topic a query suggestion belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Variance,
    Trend,
    Performance,
    Forecast,
    Risk,
}

impl SuggestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionCategory::Variance => "variance",
            SuggestionCategory::Trend => "trend",
            SuggestionCategory::Performance => "performance",
            SuggestionCategory::Forecast => "forecast",
            SuggestionCategory::Risk => "risk",
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A finding produced by one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub agent_id: AgentId,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<String>>,
    pub affected_departments: Vec<String>,
    /// Confidence in [0, 1]
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

/// A notification-worthy condition raised by one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub agent_id: AgentId,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub suggested_actions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Always false when produced; only callers flip it
    pub acknowledged: bool,
}

impl Alert {
    /// Mark the alert as handled (caller-side state)
    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }
}

/// A follow-up question an agent recommends asking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySuggestion {
    pub id: String,
    pub agent_id: AgentId,
    pub query: String,
    pub reason: String,
    pub category: SuggestionCategory,
    /// Relevance in [0, 1]
    pub relevance_score: f64,
    pub estimated_insights: u32,
}

/// Headline numbers of an executive summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_budget: f64,
    pub total_actual: f64,
    pub overall_variance: f64,
    pub departments_at_risk: usize,
    pub trends_identified: usize,
}

/// Roll-up of every agent's output for one record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub id: String,
    pub generated_by: String,
    pub period: String,
    pub key_findings: Vec<String>,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
    pub recommendations: Vec<String>,
    pub metrics: SummaryMetrics,
    pub timestamp: DateTime<Utc>,
}

/// Identity of an agent, as shown to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentProfile {
    pub id: AgentId,
    pub name: &'static str,
    pub specialty: &'static str,
    pub personality: &'static str,
    pub avatar: &'static str,
}

/// What an agent is doing with the current record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// No records supplied yet
    Ready,
    /// Nothing to report
    Active,
    /// Produced insights but no alerts
    Analyzing,
    /// Raised at least one alert
    Alerting,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Ready => "ready",
            ActivityStatus::Active => "active",
            ActivityStatus::Analyzing => "analyzing",
            ActivityStatus::Alerting => "alerting",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-agent output counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentActivity {
    pub agent: AgentId,
    pub insights: usize,
    pub alerts: usize,
    pub status: ActivityStatus,
}

/// Everything the engine produces for one record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub insights: Vec<Insight>,
    pub alerts: Vec<Alert>,
    pub suggestions: Vec<QuerySuggestion>,
    pub summary: ExecutiveSummary,
}
