//! Agent Engine - runs the roster over a record set and ranks the results

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::models::{validate, FinancialRecord};
use crate::{Error, Result};

use super::ids::{IdProvider, SystemIds};
use super::scoring::{department_names, variance_percentage};
use super::types::{
    ActivityStatus, AgentActivity, AgentId, AgentProfile, Alert, AnalysisReport,
    ExecutiveSummary, Insight, InsightType, Priority, QuerySuggestion, SummaryMetrics,
};
use super::{BudgetAnalystAgent, PerformanceAnalystAgent, RiskAdvisorAgent};

const MAX_SUGGESTIONS: usize = 6;
const MAX_RECOMMENDATIONS: usize = 5;

/// Context provided to agents
pub struct AnalysisContext<'a> {
    /// Records to analyze, already validated
    pub records: &'a [FinancialRecord],
    /// Source of ids and timestamps for outputs
    pub ids: &'a dyn IdProvider,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(records: &'a [FinancialRecord], ids: &'a dyn IdProvider) -> Self {
        Self { records, ids }
    }
}

/// An analysis strategy.
///
/// Agents are stateless: the same records always produce the same outputs,
/// apart from ids and timestamps.
pub trait Agent: Send + Sync {
    /// Who this agent is
    fn profile(&self) -> AgentProfile;

    /// Shorthand for `profile().id`
    fn id(&self) -> AgentId {
        self.profile().id
    }

    /// Findings about the records
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight>;

    /// Conditions that need someone's attention
    fn alert(&self, ctx: &AnalysisContext<'_>) -> Vec<Alert>;

    /// Follow-up questions worth asking
    fn suggest(&self, ctx: &AnalysisContext<'_>) -> Vec<QuerySuggestion>;
}

/// Build the built-in agent for an id
fn builtin(id: AgentId) -> Box<dyn Agent> {
    match id {
        AgentId::BudgetAnalyst => Box::new(BudgetAnalystAgent::new()),
        AgentId::RiskAdvisor => Box::new(RiskAdvisorAgent::new()),
        AgentId::PerformanceAnalyst => Box::new(PerformanceAnalystAgent::new()),
    }
}

/// Ordered, fixed set of agents.
///
/// Order matters: outputs are concatenated in roster order before ranking,
/// so it decides ties.
pub struct Roster {
    agents: Vec<Box<dyn Agent>>,
}

impl Roster {
    /// Build a roster from agent instances, rejecting duplicate ids
    pub fn new(agents: Vec<Box<dyn Agent>>) -> Result<Self> {
        if agents.is_empty() {
            return Err(Error::InvalidRoster(
                "roster must contain at least one agent".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for agent in &agents {
            let id = agent.id();
            if !seen.insert(id) {
                return Err(Error::InvalidRoster(format!(
                    "agent '{}' appears more than once",
                    id
                )));
            }
        }

        Ok(Self { agents })
    }

    /// Build a roster of built-in agents in the given order
    pub fn from_ids(ids: &[AgentId]) -> Result<Self> {
        Self::new(ids.iter().copied().map(builtin).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Agent> + '_ {
        self.agents.iter().map(|a| a.as_ref())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for Roster {
    /// Budget, Risk, Performance
    fn default() -> Self {
        Self {
            agents: AgentId::all().iter().copied().map(builtin).collect(),
        }
    }
}

/// The main engine that runs every agent in the roster
pub struct AgentEngine {
    roster: Roster,
    ids: Arc<dyn IdProvider>,
    generated_by: String,
    period_label: String,
}

impl Default for AgentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentEngine {
    /// Create an engine with the default roster, random ids and default labels
    pub fn new() -> Self {
        Self::with_roster(Roster::default())
    }

    /// Create an engine with a custom roster
    pub fn with_roster(roster: Roster) -> Self {
        let defaults = EngineConfig::default();
        Self {
            roster,
            ids: Arc::new(SystemIds),
            generated_by: defaults.summary.generated_by,
            period_label: defaults.summary.period_label,
        }
    }

    /// Create an engine from loaded configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let roster = Roster::from_ids(&config.roster)?;
        Ok(Self::with_roster(roster).with_labels(
            config.summary.generated_by.clone(),
            config.summary.period_label.clone(),
        ))
    }

    /// Replace the id and clock provider
    pub fn with_ids(mut self, ids: impl IdProvider + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Set the labels stamped on executive summaries
    pub fn with_labels(
        mut self,
        generated_by: impl Into<String>,
        period_label: impl Into<String>,
    ) -> Self {
        self.generated_by = generated_by.into();
        self.period_label = period_label.into();
        self
    }

    /// Profiles of every agent, in roster order
    pub fn agents(&self) -> Vec<AgentProfile> {
        self.roster.iter().map(|a| a.profile()).collect()
    }

    /// Look up one agent's profile
    pub fn agent(&self, id: AgentId) -> Option<AgentProfile> {
        self.roster.iter().find(|a| a.id() == id).map(|a| a.profile())
    }

    /// Run every agent's analysis, most severe first
    pub fn analyze_all(&self, records: &[FinancialRecord]) -> Result<Vec<Insight>> {
        let ctx = self.context(records)?;
        Ok(self.collect_insights(&ctx))
    }

    /// Collect every agent's alerts, most urgent first
    pub fn alert_all(&self, records: &[FinancialRecord]) -> Result<Vec<Alert>> {
        let ctx = self.context(records)?;
        Ok(self.collect_alerts(&ctx))
    }

    /// Collect the most relevant follow-up questions across agents
    pub fn suggest_all(&self, records: &[FinancialRecord]) -> Result<Vec<QuerySuggestion>> {
        let ctx = self.context(records)?;
        Ok(self.collect_suggestions(&ctx))
    }

    /// Build an executive summary over the records
    pub fn summarize(&self, records: &[FinancialRecord]) -> Result<ExecutiveSummary> {
        let ctx = self.context(records)?;
        let insights = self.collect_insights(&ctx);
        let alerts = self.collect_alerts(&ctx);
        Ok(self.build_summary(&ctx, &insights, &alerts))
    }

    /// Per-agent output counts and status
    pub fn activity(&self, records: &[FinancialRecord]) -> Result<Vec<AgentActivity>> {
        let ctx = self.context(records)?;

        Ok(self
            .roster
            .iter()
            .map(|agent| {
                let insights = agent.analyze(&ctx).len();
                let alerts = agent.alert(&ctx).len();
                let status = if records.is_empty() {
                    ActivityStatus::Ready
                } else if alerts > 0 {
                    ActivityStatus::Alerting
                } else if insights > 0 {
                    ActivityStatus::Analyzing
                } else {
                    ActivityStatus::Active
                };

                AgentActivity {
                    agent: agent.id(),
                    insights,
                    alerts,
                    status,
                }
            })
            .collect())
    }

    /// Insights, alerts, suggestions and summary in one pass
    pub fn report(&self, records: &[FinancialRecord]) -> Result<AnalysisReport> {
        let ctx = self.context(records)?;
        let insights = self.collect_insights(&ctx);
        let alerts = self.collect_alerts(&ctx);
        let suggestions = self.collect_suggestions(&ctx);
        let summary = self.build_summary(&ctx, &insights, &alerts);

        tracing::info!(
            records = records.len(),
            insights = insights.len(),
            alerts = alerts.len(),
            suggestions = suggestions.len(),
            "Analysis report complete"
        );

        Ok(AnalysisReport {
            insights,
            alerts,
            suggestions,
            summary,
        })
    }

    fn context<'a>(&'a self, records: &'a [FinancialRecord]) -> Result<AnalysisContext<'a>> {
        if let Err(e) = validate(records) {
            tracing::warn!(error = %e, "Rejected record set");
            return Err(e);
        }
        Ok(AnalysisContext::new(records, self.ids.as_ref()))
    }

    fn collect_insights(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut all = vec![];
        for agent in self.roster.iter() {
            let insights = agent.analyze(ctx);
            tracing::debug!(
                agent = agent.id().as_str(),
                count = insights.len(),
                "Agent analysis complete"
            );
            all.extend(insights);
        }

        // Severity first, then confidence; stable so roster order breaks ties
        all.sort_by(|a, b| {
            b.severity
                .rank()
                .cmp(&a.severity.rank())
                .then_with(|| b.confidence.total_cmp(&a.confidence))
        });
        all
    }

    fn collect_alerts(&self, ctx: &AnalysisContext<'_>) -> Vec<Alert> {
        let mut all = vec![];
        for agent in self.roster.iter() {
            let alerts = agent.alert(ctx);
            tracing::debug!(
                agent = agent.id().as_str(),
                count = alerts.len(),
                "Agent alerts complete"
            );
            all.extend(alerts);
        }

        all.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
        all
    }

    fn collect_suggestions(&self, ctx: &AnalysisContext<'_>) -> Vec<QuerySuggestion> {
        let mut all: Vec<QuerySuggestion> =
            self.roster.iter().flat_map(|a| a.suggest(ctx)).collect();

        all.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        all.truncate(MAX_SUGGESTIONS);
        all
    }

    fn build_summary(
        &self,
        ctx: &AnalysisContext<'_>,
        insights: &[Insight],
        alerts: &[Alert],
    ) -> ExecutiveSummary {
        let total_budget: f64 = ctx.records.iter().map(|r| r.metrics.budget).sum();
        let total_actual: f64 = ctx.records.iter().map(|r| r.metrics.actual).sum();
        let overall_variance = variance_percentage(total_budget, total_actual);

        let mut at_risk: Vec<&str> = Vec::new();
        for insight in insights.iter().filter(|i| i.severity.is_elevated()) {
            for dept in &insight.affected_departments {
                if !at_risk.contains(&dept.as_str()) {
                    at_risk.push(dept.as_str());
                }
            }
        }

        let urgent_alerts = alerts
            .iter()
            .filter(|a| matches!(a.priority, Priority::Urgent | Priority::High))
            .count();

        let key_findings = vec![
            format!(
                "Overall budget variance: {}{:.1}%",
                if overall_variance > 0.0 { "+" } else { "" },
                overall_variance
            ),
            format!(
                "{} insights identified across {} departments",
                insights.len(),
                department_names(ctx.records).len()
            ),
            format!("{} high-priority alerts require attention", urgent_alerts),
            format!("{} departments show elevated risk levels", at_risk.len()),
        ];

        let titles_of = |kind: InsightType| -> Vec<String> {
            insights
                .iter()
                .filter(|i| i.insight_type == kind)
                .map(|i| i.title.clone())
                .collect()
        };

        let recommendations = insights
            .iter()
            .flat_map(|i| i.action_items.iter().flatten())
            .take(MAX_RECOMMENDATIONS)
            .cloned()
            .collect();

        ExecutiveSummary {
            id: ctx.ids.next_id("exec-summary"),
            generated_by: self.generated_by.clone(),
            period: self.period_label.clone(),
            key_findings,
            risks: titles_of(InsightType::Risk),
            opportunities: titles_of(InsightType::Opportunity),
            recommendations,
            metrics: SummaryMetrics {
                total_budget,
                total_actual,
                overall_variance,
                departments_at_risk: at_risk.len(),
                trends_identified: insights
                    .iter()
                    .filter(|i| i.insight_type == InsightType::Trend)
                    .count(),
            },
            timestamp: ctx.ids.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::ids::SequentialIds;
    use crate::insights::types::{Severity, SuggestionCategory};

    fn engine() -> AgentEngine {
        AgentEngine::new().with_ids(SequentialIds::default())
    }

    fn marketing_and_it() -> Vec<FinancialRecord> {
        vec![
            FinancialRecord::new("Marketing", 500_000.0, 520_000.0),
            FinancialRecord::new("IT", 200_000.0, 240_000.0),
        ]
    }

    /// Agent that reports a fixed insight, for roster tests
    struct EchoAgent {
        id: AgentId,
        severity: Severity,
    }

    impl Agent for EchoAgent {
        fn profile(&self) -> AgentProfile {
            AgentProfile {
                id: self.id,
                name: "Echo",
                specialty: "Testing",
                personality: "Repetitive",
                avatar: "E",
            }
        }

        fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
            vec![Insight {
                id: ctx.ids.next_id("insight"),
                agent_id: self.id,
                insight_type: InsightType::Trend,
                severity: self.severity,
                title: format!("Echo from {}", self.id),
                description: String::new(),
                details: String::new(),
                action_items: None,
                affected_departments: vec![],
                confidence: 0.5,
                timestamp: ctx.ids.now(),
            }]
        }

        fn alert(&self, _ctx: &AnalysisContext<'_>) -> Vec<Alert> {
            vec![]
        }

        fn suggest(&self, _ctx: &AnalysisContext<'_>) -> Vec<QuerySuggestion> {
            vec![]
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = AgentEngine::new();
        let ids: Vec<_> = engine.agents().iter().map(|p| p.id).collect();

        assert_eq!(
            ids,
            vec![
                AgentId::BudgetAnalyst,
                AgentId::RiskAdvisor,
                AgentId::PerformanceAnalyst
            ]
        );
        assert_eq!(
            engine.agent(AgentId::RiskAdvisor).map(|p| p.name),
            Some("Morgan Taylor")
        );
    }

    #[test]
    fn test_analyze_ranked_by_severity_then_confidence() {
        let insights = engine().analyze_all(&marketing_and_it()).unwrap();

        let summary: Vec<_> = insights
            .iter()
            .map(|i| (i.agent_id, i.severity, i.title.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (
                    AgentId::BudgetAnalyst,
                    Severity::Critical,
                    "IT Department Variance Alert"
                ),
                (
                    AgentId::RiskAdvisor,
                    Severity::Critical,
                    "High Financial Risk - IT"
                ),
                (
                    AgentId::PerformanceAnalyst,
                    Severity::Medium,
                    "Marketing Performance Excellence"
                ),
                (
                    AgentId::PerformanceAnalyst,
                    Severity::Medium,
                    "IT Performance Excellence"
                ),
            ]
        );
    }

    #[test]
    fn test_alerts_ranked_by_priority() {
        let records = vec![
            FinancialRecord::new("Ops", 1000.0, 1150.0),
            FinancialRecord::new("IT", 200_000.0, 240_000.0),
        ];
        let alerts = engine().alert_all(&records).unwrap();

        let priorities: Vec<_> = alerts.iter().map(|a| a.priority).collect();
        // Budget IT (urgent), Risk IT (urgent), then Risk Ops (high)
        assert_eq!(
            priorities,
            vec![Priority::Urgent, Priority::Urgent, Priority::High]
        );
        assert_eq!(alerts[0].agent_id, AgentId::BudgetAnalyst);
        assert_eq!(alerts[2].department.as_deref(), Some("Ops"));
    }

    #[test]
    fn test_suggestions_capped_at_six() {
        let records = vec![
            FinancialRecord::new("A", 1000.0, 1100.0),
            FinancialRecord::new("B", 1000.0, 1300.0),
            FinancialRecord::new("C", 1000.0, 850.0),
            FinancialRecord::new("E", 1000.0, 1200.0),
        ];
        let suggestions = engine().suggest_all(&records).unwrap();

        assert_eq!(suggestions.len(), 6);
        assert_eq!(suggestions[0].agent_id, AgentId::BudgetAnalyst);
        assert_eq!(suggestions[2].category, SuggestionCategory::Risk);
        assert_eq!(suggestions[3].category, SuggestionCategory::Performance);
        // C (0.75) fell off the end
        assert!(suggestions.iter().all(|s| s.relevance_score >= 0.8));
    }

    #[test]
    fn test_summary() {
        let summary = engine().summarize(&marketing_and_it()).unwrap();

        assert_eq!(
            summary.key_findings,
            vec![
                "Overall budget variance: +8.6%",
                "4 insights identified across 2 departments",
                "2 high-priority alerts require attention",
                "1 departments show elevated risk levels",
            ]
        );
        assert_eq!(
            summary.risks,
            vec!["IT Department Variance Alert", "High Financial Risk - IT"]
        );
        assert_eq!(
            summary.opportunities,
            vec![
                "Marketing Performance Excellence",
                "IT Performance Excellence"
            ]
        );
        assert_eq!(summary.recommendations.len(), 5);
        assert_eq!(
            summary.recommendations[3],
            "Conduct comprehensive financial review"
        );
        assert_eq!(summary.metrics.total_budget, 700_000.0);
        assert_eq!(summary.metrics.total_actual, 760_000.0);
        assert_eq!(summary.metrics.departments_at_risk, 1);
        assert_eq!(summary.metrics.trends_identified, 0);
        assert_eq!(summary.generated_by, "Multi-Agent Analysis");
        assert_eq!(summary.period, "Current Period");
        assert!(summary.id.starts_with("exec-summary-"));
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = engine().summarize(&[]).unwrap();

        assert_eq!(
            summary.key_findings,
            vec![
                "Overall budget variance: 0.0%",
                "0 insights identified across 0 departments",
                "0 high-priority alerts require attention",
                "0 departments show elevated risk levels",
            ]
        );
        assert_eq!(summary.metrics.total_budget, 0.0);
        assert_eq!(summary.metrics.overall_variance, 0.0);
        assert!(summary.risks.is_empty());
        assert!(summary.recommendations.is_empty());
    }

    #[test]
    fn test_summary_negative_variance_has_no_plus() {
        let records = vec![FinancialRecord::new("HR", 1000.0, 850.0)];
        let summary = engine().summarize(&records).unwrap();
        assert_eq!(summary.key_findings[0], "Overall budget variance: -15.0%");
    }

    #[test]
    fn test_activity() {
        let engine = engine();

        let idle = engine.activity(&[]).unwrap();
        assert!(idle.iter().all(|a| a.status == ActivityStatus::Ready));

        let activity = engine.activity(&marketing_and_it()).unwrap();
        assert_eq!(activity[0].agent, AgentId::BudgetAnalyst);
        assert_eq!(activity[0].status, ActivityStatus::Alerting);
        assert_eq!(activity[2].insights, 2);
        assert_eq!(activity[2].status, ActivityStatus::Analyzing);

        let calm = engine
            .activity(&[FinancialRecord::new("Ops", 1000.0, 1300.0)])
            .unwrap();
        // 30% over: everyone but Performance has something to say
        assert_eq!(calm[2].status, ActivityStatus::Active);
    }

    #[test]
    fn test_report_uses_one_pass() {
        let report = engine().report(&marketing_and_it()).unwrap();

        assert_eq!(report.insights.len(), 4);
        assert_eq!(report.alerts.len(), 2);
        assert_eq!(report.suggestions.len(), 5);
        assert_eq!(report.summary.risks.len(), 2);
    }

    #[test]
    fn test_invalid_record_fails_fast() {
        let mut records = marketing_and_it();
        records[1].metrics.actual = f64::NAN;

        let err = engine().analyze_all(&records).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { index: 1, .. }));
        assert!(engine().summarize(&records).is_err());
        assert!(engine().report(&records).is_err());
    }

    #[test]
    fn test_roster_order_breaks_ties() {
        let roster = Roster::new(vec![
            Box::new(EchoAgent {
                id: AgentId::RiskAdvisor,
                severity: Severity::High,
            }),
            Box::new(EchoAgent {
                id: AgentId::BudgetAnalyst,
                severity: Severity::High,
            }),
        ])
        .unwrap();
        let engine = AgentEngine::with_roster(roster).with_ids(SequentialIds::default());

        let insights = engine.analyze_all(&[]).unwrap();
        assert_eq!(insights[0].agent_id, AgentId::RiskAdvisor);
        assert_eq!(insights[1].agent_id, AgentId::BudgetAnalyst);

        let summary = engine.summarize(&[]).unwrap();
        assert_eq!(summary.metrics.trends_identified, 2);
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let err = Roster::from_ids(&[AgentId::BudgetAnalyst, AgentId::BudgetAnalyst])
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidRoster(_)));
        assert!(Roster::from_ids(&[]).is_err());
    }

    #[test]
    fn test_custom_roster_subset() {
        let roster = Roster::from_ids(&[AgentId::PerformanceAnalyst]).unwrap();
        let engine = AgentEngine::with_roster(roster);

        assert_eq!(engine.agents().len(), 1);
        assert!(engine.agent(AgentId::BudgetAnalyst).is_none());
    }
}
