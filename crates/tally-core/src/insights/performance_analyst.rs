//! Performance Analyst Agent
//!
//! Rates how closely each department tracks its budget. Scores of 8+ are
//! praised as opportunities to share practices; scores of 3 or less get an
//! improvement recommendation and a high-priority alert.

use super::engine::{Agent, AnalysisContext};
use super::scoring::{aggregate_by_department, efficiency, performance_score};
use super::types::{
    AgentId, AgentProfile, Alert, AlertType, Insight, InsightType, Priority, QuerySuggestion,
    Severity, SuggestionCategory,
};

const EXCELLENCE_THRESHOLD: f64 = 8.0;
const IMPROVEMENT_THRESHOLD: f64 = 3.0;
const CONFIDENCE: f64 = 0.8;

const EXCELLENCE_ACTIONS: [&str; 2] = [
    "Document best practices for other departments",
    "Consider expanding successful initiatives",
];

const IMPROVEMENT_ACTIONS: [&str; 2] = [
    "Review current processes and identify bottlenecks",
    "Implement performance improvement plan",
];

const ALERT_ACTIONS: [&str; 2] = [
    "Schedule performance review meeting",
    "Analyze root causes of performance issues",
];

struct PerformanceMetric {
    department: String,
    score: f64,
    efficiency: f64,
}

/// Agent that scores departmental budget performance
pub struct PerformanceAnalystAgent;

impl PerformanceAnalystAgent {
    pub fn new() -> Self {
        Self
    }

    fn metrics(&self, ctx: &AnalysisContext<'_>) -> Vec<PerformanceMetric> {
        aggregate_by_department(ctx.records)
            .into_iter()
            .map(|dept| PerformanceMetric {
                score: performance_score(dept.variance_percentage),
                efficiency: efficiency(dept.budget, dept.actual),
                department: dept.name,
            })
            .collect()
    }
}

impl Default for PerformanceAnalystAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for PerformanceAnalystAgent {
    fn profile(&self) -> AgentProfile {
        AgentProfile {
            id: AgentId::PerformanceAnalyst,
            name: "Jamie Rivera",
            specialty: "Performance Metrics & Optimization",
            personality:
                "Results-driven, optimization-focused, always looking for improvement opportunities",
            avatar: "📈",
        }
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        self.metrics(ctx)
            .into_iter()
            .filter_map(|metric| {
                let (insight_type, severity, label, description, actions) =
                    if metric.score >= EXCELLENCE_THRESHOLD {
                        (
                            InsightType::Opportunity,
                            Severity::Medium,
                            "Excellence",
                            format!(
                                "{} demonstrates exceptional financial performance",
                                metric.department
                            ),
                            EXCELLENCE_ACTIONS,
                        )
                    } else if metric.score <= IMPROVEMENT_THRESHOLD {
                        (
                            InsightType::Recommendation,
                            Severity::High,
                            "Improvement",
                            format!(
                                "{} shows opportunity for performance improvement",
                                metric.department
                            ),
                            IMPROVEMENT_ACTIONS,
                        )
                    } else {
                        return None;
                    };

                Some(Insight {
                    id: ctx.ids.next_id("insight"),
                    agent_id: AgentId::PerformanceAnalyst,
                    insight_type,
                    severity,
                    title: format!("{} Performance {}", metric.department, label),
                    description,
                    details: format!(
                        "Performance Score: {:.1}/10, Efficiency: {:.1}%",
                        metric.score, metric.efficiency
                    ),
                    action_items: Some(actions.iter().map(|a| a.to_string()).collect()),
                    affected_departments: vec![metric.department],
                    confidence: CONFIDENCE,
                    timestamp: ctx.ids.now(),
                })
            })
            .collect()
    }

    fn alert(&self, ctx: &AnalysisContext<'_>) -> Vec<Alert> {
        self.metrics(ctx)
            .into_iter()
            .filter(|m| m.score <= IMPROVEMENT_THRESHOLD)
            .map(|metric| Alert {
                id: ctx.ids.next_id("alert"),
                agent_id: AgentId::PerformanceAnalyst,
                alert_type: AlertType::BudgetRisk,
                priority: Priority::High,
                title: format!("Performance Alert - {}", metric.department),
                message: format!(
                    "{} performance score is critically low ({:.1}/10)",
                    metric.department, metric.score
                ),
                department: Some(metric.department),
                suggested_actions: ALERT_ACTIONS.iter().map(|a| a.to_string()).collect(),
                timestamp: ctx.ids.now(),
                acknowledged: false,
            })
            .collect()
    }

    fn suggest(&self, ctx: &AnalysisContext<'_>) -> Vec<QuerySuggestion> {
        vec![
            QuerySuggestion {
                id: ctx.ids.next_id("suggestion"),
                agent_id: AgentId::PerformanceAnalyst,
                query: "Compare department performance metrics".to_string(),
                reason: "Identify top and bottom performers for learning opportunities"
                    .to_string(),
                category: SuggestionCategory::Performance,
                relevance_score: 0.9,
                estimated_insights: 3,
            },
            QuerySuggestion {
                id: ctx.ids.next_id("suggestion"),
                agent_id: AgentId::PerformanceAnalyst,
                query: "Show efficiency trends by category".to_string(),
                reason: "Track performance improvements over time".to_string(),
                category: SuggestionCategory::Trend,
                relevance_score: 0.8,
                estimated_insights: 2,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::ids::SequentialIds;
    use crate::models::FinancialRecord;

    fn run<T>(records: &[FinancialRecord], f: impl Fn(&AnalysisContext<'_>) -> T) -> T {
        let ids = SequentialIds::default();
        let ctx = AnalysisContext::new(records, &ids);
        f(&ctx)
    }

    #[test]
    fn test_excellence() {
        // 4% variance -> score 9.6
        let records = vec![FinancialRecord::new("Marketing", 500_000.0, 520_000.0)];
        let agent = PerformanceAnalystAgent::new();

        let insights = run(&records, |ctx| agent.analyze(ctx));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].insight_type, InsightType::Opportunity);
        assert_eq!(insights[0].severity, Severity::Medium);
        assert_eq!(insights[0].title, "Marketing Performance Excellence");
        assert_eq!(
            insights[0].details,
            "Performance Score: 9.6/10, Efficiency: 96.2%"
        );
        assert!(run(&records, |ctx| agent.alert(ctx)).is_empty());
    }

    #[test]
    fn test_middle_band_is_quiet() {
        // 30% variance -> score 7
        let records = vec![FinancialRecord::new("Ops", 1000.0, 1300.0)];
        let agent = PerformanceAnalystAgent::new();

        assert!(run(&records, |ctx| agent.analyze(ctx)).is_empty());
        assert!(run(&records, |ctx| agent.alert(ctx)).is_empty());
    }

    #[test]
    fn test_needs_improvement() {
        // 80% overspend -> score 2
        let records = vec![FinancialRecord::new("Facilities", 1000.0, 1800.0)];
        let agent = PerformanceAnalystAgent::new();

        let insights = run(&records, |ctx| agent.analyze(ctx));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].insight_type, InsightType::Recommendation);
        assert_eq!(insights[0].severity, Severity::High);
        assert_eq!(insights[0].title, "Facilities Performance Improvement");

        let alerts = run(&records, |ctx| agent.alert(ctx));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].priority, Priority::High);
        assert_eq!(
            alerts[0].message,
            "Facilities performance score is critically low (2.0/10)"
        );
    }

    #[test]
    fn test_nothing_spent() {
        let records = vec![FinancialRecord::new("R&D", 1000.0, 0.0)];
        let agent = PerformanceAnalystAgent::new();

        // -100% variance -> score 0, efficiency 0 since nothing was spent
        let insights = run(&records, |ctx| agent.analyze(ctx));
        assert_eq!(
            insights[0].details,
            "Performance Score: 0.0/10, Efficiency: 0.0%"
        );
    }

    #[test]
    fn test_fixed_suggestions() {
        let agent = PerformanceAnalystAgent::new();
        let suggestions = run(&[], |ctx| agent.suggest(ctx));

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].category, SuggestionCategory::Performance);
        assert_eq!(suggestions[1].category, SuggestionCategory::Trend);
        assert_eq!(suggestions[1].estimated_insights, 2);
    }
}
