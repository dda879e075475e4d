//! Budget Analyst Agent
//!
//! Flags departments whose actual spend drifts from budget:
//! - Insight for any department at 10%+ variance (over = risk, under = opportunity)
//! - Urgent alert at 20%+ variance
//! - Follow-up questions for the three largest variances

use super::engine::{Agent, AnalysisContext};
use super::scoring::{aggregate_by_department, format_amount, severity_from_variance};
use super::types::{
    AgentId, AgentProfile, Alert, AlertType, Insight, InsightType, Priority, QuerySuggestion,
    SuggestionCategory,
};

/// Minimum absolute variance (%) for an insight or suggestion
const INSIGHT_THRESHOLD: f64 = 10.0;
/// Minimum absolute variance (%) for an urgent alert
const ALERT_THRESHOLD: f64 = 20.0;
const MAX_SUGGESTIONS: usize = 3;
const CONFIDENCE: f64 = 0.9;

const OVER_BUDGET_ACTIONS: [&str; 3] = [
    "Review recent expenses and identify cost drivers",
    "Implement cost control measures",
    "Update budget forecast for remaining periods",
];

const UNDER_BUDGET_ACTIONS: [&str; 3] = [
    "Analyze underspending reasons",
    "Consider reallocating unused budget",
    "Accelerate planned initiatives",
];

const ALERT_ACTIONS: [&str; 3] = [
    "Schedule immediate budget review meeting",
    "Freeze non-essential spending",
    "Prepare variance explanation report",
];

/// Agent that tracks budget-vs-actual variance per department
pub struct BudgetAnalystAgent;

impl BudgetAnalystAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BudgetAnalystAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for BudgetAnalystAgent {
    fn profile(&self) -> AgentProfile {
        AgentProfile {
            id: AgentId::BudgetAnalyst,
            name: "Alex Chen",
            specialty: "Budget Analysis & Variance Detection",
            personality: "Detail-oriented, analytical, proactive in identifying budget discrepancies",
            avatar: "👩‍💼",
        }
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        aggregate_by_department(ctx.records)
            .into_iter()
            .filter(|d| d.variance_percentage.abs() >= INSIGHT_THRESHOLD)
            .map(|dept| {
                let over = dept.variance_percentage > 0.0;
                let actions = if over {
                    OVER_BUDGET_ACTIONS
                } else {
                    UNDER_BUDGET_ACTIONS
                };

                Insight {
                    id: ctx.ids.next_id("insight"),
                    agent_id: AgentId::BudgetAnalyst,
                    insight_type: if over {
                        InsightType::Risk
                    } else {
                        InsightType::Opportunity
                    },
                    severity: severity_from_variance(dept.variance_percentage),
                    title: format!("{} Department Variance Alert", dept.name),
                    description: format!(
                        "{} is {} budget by {:.1}%",
                        dept.name,
                        if over { "over" } else { "under" },
                        dept.variance_percentage.abs()
                    ),
                    details: format!(
                        "Budget: ${}, Actual: ${}, Variance: ${}",
                        format_amount(dept.budget),
                        format_amount(dept.actual),
                        format_amount(dept.variance)
                    ),
                    action_items: Some(actions.iter().map(|a| a.to_string()).collect()),
                    affected_departments: vec![dept.name],
                    confidence: CONFIDENCE,
                    timestamp: ctx.ids.now(),
                }
            })
            .collect()
    }

    fn alert(&self, ctx: &AnalysisContext<'_>) -> Vec<Alert> {
        aggregate_by_department(ctx.records)
            .into_iter()
            .filter(|d| d.variance_percentage.abs() >= ALERT_THRESHOLD)
            .map(|dept| Alert {
                id: ctx.ids.next_id("alert"),
                agent_id: AgentId::BudgetAnalyst,
                alert_type: AlertType::BudgetRisk,
                priority: Priority::Urgent,
                title: format!("Critical Budget Variance - {}", dept.name),
                message: format!(
                    "{} department has exceeded budget threshold with {:.1}% variance",
                    dept.name, dept.variance_percentage
                ),
                department: Some(dept.name),
                suggested_actions: ALERT_ACTIONS.iter().map(|a| a.to_string()).collect(),
                timestamp: ctx.ids.now(),
                acknowledged: false,
            })
            .collect()
    }

    fn suggest(&self, ctx: &AnalysisContext<'_>) -> Vec<QuerySuggestion> {
        let mut notable: Vec<_> = aggregate_by_department(ctx.records)
            .into_iter()
            .filter(|d| d.variance_percentage.abs() >= INSIGHT_THRESHOLD)
            .collect();

        // Largest variance first; stable so ties keep first-seen order
        notable.sort_by(|a, b| {
            b.variance_percentage
                .abs()
                .total_cmp(&a.variance_percentage.abs())
        });
        notable.truncate(MAX_SUGGESTIONS);

        notable
            .into_iter()
            .map(|dept| {
                let abs = dept.variance_percentage.abs();
                QuerySuggestion {
                    id: ctx.ids.next_id("suggestion"),
                    agent_id: AgentId::BudgetAnalyst,
                    query: format!("What's driving the {} budget variance?", dept.name),
                    reason: format!(
                        "{} shows {:.1}% variance - worth investigating",
                        dept.name, abs
                    ),
                    category: SuggestionCategory::Variance,
                    relevance_score: (abs / 20.0).min(1.0),
                    estimated_insights: 3,
                }
            })
            .collect()
    }
}
