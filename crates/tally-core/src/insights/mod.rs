//! Agent Engine - Multi-Agent Financial Insights
//!
//! A fixed roster of analysis agents reads departmental budget records and
//! proactively surfaces what needs attention: ranked insights, prioritized
//! alerts, follow-up questions and an executive summary.
//!
//! ## Built-in Agents
//!
//! - **Budget Analyst** - Flags budget-vs-actual variance per department
//! - **Risk Advisor** - Scores financial risk from variance
//! - **Performance Analyst** - Scores performance and budget efficiency
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::AgentEngine;
//!
//! let engine = AgentEngine::new();
//! let insights = engine.analyze_all(&records)?;
//! let summary = engine.summarize(&records)?;
//! ```

pub mod budget_analyst;
pub mod engine;
pub mod ids;
pub mod performance_analyst;
pub mod risk_advisor;
pub mod scoring;
pub mod types;

pub use budget_analyst::BudgetAnalystAgent;
pub use engine::{Agent, AgentEngine, AnalysisContext, Roster};
pub use ids::{IdProvider, SequentialIds, SystemIds};
pub use performance_analyst::PerformanceAnalystAgent;
pub use risk_advisor::RiskAdvisorAgent;
pub use scoring::DepartmentAggregate;
pub use types::{
    ActivityStatus, AgentActivity, AgentId, AgentProfile, Alert, AlertType, AnalysisReport,
    ExecutiveSummary, Insight, InsightType, Priority, QuerySuggestion, Severity,
    SuggestionCategory, SummaryMetrics,
};
