//! Input data model: budget/actual financial records
//!
//! Records are supplied by the caller and never mutated by the engine.
//! Several records may share a department, category and period; the engine
//! sums them rather than treating them as duplicates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::insights::scoring::check_aggregates;

/// Department a record is booked against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// Spending/revenue category of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Fiscal quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Quarter {
    type Err = String;

    /// Accepts "Q1", "q1" or a bare "1"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('Q')
            .or_else(|| s.strip_prefix('q'))
            .unwrap_or(s);
        match digits {
            "1" => Ok(Quarter::Q1),
            "2" => Ok(Quarter::Q2),
            "3" => Ok(Quarter::Q3),
            "4" => Ok(Quarter::Q4),
            _ => Err(format!("Unknown quarter: {}", s)),
        }
    }
}

impl TryFrom<String> for Quarter {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Quarter> for String {
    fn from(quarter: Quarter) -> Self {
        quarter.as_str().to_string()
    }
}

/// Reporting period of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub quarter: Quarter,
}

impl Period {
    pub fn new(year: i32, quarter: Quarter) -> Self {
        Self { year, quarter }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.quarter)
    }
}

impl FromStr for Period {
    type Err = String;

    /// Parses "2024-Q1", "2024 Q1" or "2024Q1"
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c == '-' || c == ' ' || c == 'Q' || c == 'q')
            .ok_or_else(|| format!("Invalid period: {} (expected e.g. 2024-Q1)", s))?;
        let year = s[..split]
            .parse::<i32>()
            .map_err(|_| format!("Invalid period year: {}", s))?;
        let quarter = s[split..].trim_start_matches(['-', ' ']).parse::<Quarter>()?;
        Ok(Self { year, quarter })
    }
}

/// Budget, actual, forecast and prior-year amounts for one record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub budget: f64,
    pub actual: f64,
    pub forecast: f64,
    #[serde(rename = "priorYear", alias = "prior_year")]
    pub prior_year: f64,
}

impl Metrics {
    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("budget", self.budget),
            ("actual", self.actual),
            ("forecast", self.forecast),
            ("priorYear", self.prior_year),
        ]
    }
}

/// One budget/actual line supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Opaque caller-side identifier, carried but never analyzed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub department: Department,
    pub category: Category,
    pub period: Period,
    pub metrics: Metrics,
}

impl FinancialRecord {
    /// Create a record for a department with the given budget and actual.
    ///
    /// Category defaults to "General", period to 2024-Q1, forecast to the
    /// actual amount and prior year to the budget.
    pub fn new(department: impl Into<String>, budget: f64, actual: f64) -> Self {
        let department = department.into();
        Self {
            id: None,
            department: Department {
                id: slug(&department),
                name: department,
            },
            category: Category {
                id: "general".to_string(),
                name: "General".to_string(),
            },
            period: Period::new(2024, Quarter::Q1),
            metrics: Metrics {
                budget,
                actual,
                forecast: actual,
                prior_year: budget,
            },
        }
    }

    /// Set the category
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.category = Category {
            id: slug(&name),
            name,
        };
        self
    }

    /// Set the reporting period
    pub fn with_period(mut self, year: i32, quarter: Quarter) -> Self {
        self.period = Period::new(year, quarter);
        self
    }

    /// Set forecast and prior-year amounts
    pub fn with_projection(mut self, forecast: f64, prior_year: f64) -> Self {
        self.metrics.forecast = forecast;
        self.metrics.prior_year = prior_year;
        self
    }
}

fn slug(name: &str) -> String {
    name.trim().to_lowercase().replace(char::is_whitespace, "-")
}

/// Check every record before any scoring runs.
///
/// Fails on the first record with an empty department name or a metric that
/// is NaN or infinite. Department and overall totals must stay finite as
/// well; otherwise NaN percentages corrupt severity tiers and sort order.
pub fn validate(records: &[FinancialRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if record.department.name.trim().is_empty() {
            return Err(Error::invalid_record(index, "missing department name"));
        }
        for (field, value) in record.metrics.named() {
            if !value.is_finite() {
                return Err(Error::invalid_record(
                    index,
                    format!("metric `{}` is not a finite number ({})", field, value),
                ));
            }
        }
    }
    check_aggregates(records)
}

/// Keep only the records booked in `period`.
///
/// The engine sums whatever it is given, so callers that want a single
/// period must narrow the slice themselves.
pub fn filter_period(records: &[FinancialRecord], period: Period) -> Vec<FinancialRecord> {
    records
        .iter()
        .filter(|r| r.period == period)
        .cloned()
        .collect()
}
