//! Risk Advisor Agent
//!
//! Scores each department's financial risk from its variance and reports
//! departments scoring 7 or more. Suggestions are fixed and do not depend on
//! the data.

use super::engine::{Agent, AnalysisContext};
use super::scoring::{aggregate_by_department, risk_score};
use super::types::{
    AgentId, AgentProfile, Alert, AlertType, Insight, InsightType, Priority, QuerySuggestion,
    Severity, SuggestionCategory,
};

const RISK_THRESHOLD: f64 = 7.0;
const CRITICAL_THRESHOLD: f64 = 8.0;
const CONFIDENCE: f64 = 0.85;

const RISK_ACTIONS: [&str; 3] = [
    "Conduct comprehensive financial review",
    "Implement enhanced monitoring controls",
    "Develop risk mitigation plan",
];

/// A department whose risk score crossed the threshold
struct RiskFinding {
    department: String,
    score: f64,
    variance_percentage: f64,
    severity: Severity,
}

impl RiskFinding {
    fn title(&self) -> String {
        format!("High Financial Risk - {}", self.department)
    }

    fn description(&self) -> String {
        format!(
            "{} department shows high financial risk indicators",
            self.department
        )
    }
}

/// Agent that scores departmental financial risk
pub struct RiskAdvisorAgent;

impl RiskAdvisorAgent {
    pub fn new() -> Self {
        Self
    }

    fn assess(&self, ctx: &AnalysisContext<'_>) -> Vec<RiskFinding> {
        aggregate_by_department(ctx.records)
            .into_iter()
            .filter_map(|dept| {
                let score = risk_score(dept.variance_percentage);
                if score < RISK_THRESHOLD {
                    return None;
                }
                Some(RiskFinding {
                    department: dept.name,
                    score,
                    variance_percentage: dept.variance_percentage,
                    severity: if score >= CRITICAL_THRESHOLD {
                        Severity::Critical
                    } else {
                        Severity::High
                    },
                })
            })
            .collect()
    }
}

impl Default for RiskAdvisorAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RiskAdvisorAgent {
    fn profile(&self) -> AgentProfile {
        AgentProfile {
            id: AgentId::RiskAdvisor,
            name: "Morgan Taylor",
            specialty: "Risk Assessment & Strategic Planning",
            personality: "Strategic thinker, risk-aware, focused on long-term financial health",
            avatar: "🛡️",
        }
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        self.assess(ctx)
            .into_iter()
            .map(|risk| Insight {
                id: ctx.ids.next_id("insight"),
                agent_id: AgentId::RiskAdvisor,
                insight_type: InsightType::Risk,
                severity: risk.severity,
                title: risk.title(),
                description: risk.description(),
                details: format!(
                    "Risk Score: {:.1}/10, Variance: {:.1}%",
                    risk.score, risk.variance_percentage
                ),
                action_items: Some(RISK_ACTIONS.iter().map(|a| a.to_string()).collect()),
                affected_departments: vec![risk.department],
                confidence: CONFIDENCE,
                timestamp: ctx.ids.now(),
            })
            .collect()
    }

    fn alert(&self, ctx: &AnalysisContext<'_>) -> Vec<Alert> {
        self.assess(ctx)
            .into_iter()
            .map(|risk| Alert {
                id: ctx.ids.next_id("alert"),
                agent_id: AgentId::RiskAdvisor,
                alert_type: AlertType::BudgetRisk,
                priority: if risk.severity == Severity::Critical {
                    Priority::Urgent
                } else {
                    Priority::High
                },
                title: risk.title(),
                message: risk.description(),
                department: Some(risk.department),
                suggested_actions: RISK_ACTIONS.iter().map(|a| a.to_string()).collect(),
                timestamp: ctx.ids.now(),
                acknowledged: false,
            })
            .collect()
    }

    fn suggest(&self, ctx: &AnalysisContext<'_>) -> Vec<QuerySuggestion> {
        vec![
            QuerySuggestion {
                id: ctx.ids.next_id("suggestion"),
                agent_id: AgentId::RiskAdvisor,
                query: "Show me departments with highest financial risk".to_string(),
                reason: "Identify departments requiring immediate attention".to_string(),
                category: SuggestionCategory::Risk,
                relevance_score: 0.9,
                estimated_insights: 4,
            },
            QuerySuggestion {
                id: ctx.ids.next_id("suggestion"),
                agent_id: AgentId::RiskAdvisor,
                query: "Analyze spending volatility by category".to_string(),
                reason: "Understand expense predictability and control".to_string(),
                category: SuggestionCategory::Variance,
                relevance_score: 0.8,
                estimated_insights: 3,
            },
        ]
    }
}
