//! Scoring primitives shared by every agent
//!
//! All functions here are pure. Thresholds are fixed constants; the tier
//! boundaries in [`severity_from_variance`] are inclusive at the lower end.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::models::FinancialRecord;

use super::types::Severity;

/// Variance percentage `(actual - budget) / budget * 100`.
///
/// A zero budget yields 0 rather than an infinite or NaN percentage, so a
/// department without a budget never trips a variance threshold.
pub fn variance_percentage(budget: f64, actual: f64) -> f64 {
    if budget == 0.0 {
        return 0.0;
    }
    (actual - budget) / budget * 100.0
}

/// Tier a variance percentage by its absolute value:
/// `< 10` low, `10..15` medium, `15..20` high, `>= 20` critical.
pub fn severity_from_variance(percent: f64) -> Severity {
    let abs = percent.abs();
    if abs >= 20.0 {
        Severity::Critical
    } else if abs >= 15.0 {
        Severity::High
    } else if abs >= 10.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Risk score in [0, 10]: half the absolute variance, capped at 10
pub fn risk_score(percent: f64) -> f64 {
    (percent.abs() / 2.0).min(10.0)
}

/// Performance score in [0, 10]: 10 minus a tenth of the absolute variance
pub fn performance_score(percent: f64) -> f64 {
    (10.0 - percent.abs() / 10.0).max(0.0)
}

/// Budget efficiency `budget / actual * 100`, or 0 when nothing was spent
pub fn efficiency(budget: f64, actual: f64) -> f64 {
    if actual > 0.0 {
        budget / actual * 100.0
    } else {
        0.0
    }
}

/// Budget and actual summed over every record of one department
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentAggregate {
    pub name: String,
    pub budget: f64,
    pub actual: f64,
    pub variance: f64,
    pub variance_percentage: f64,
}

/// Group records by department name, in first-seen order.
///
/// Category and period are ignored: everything supplied for a department is
/// summed.
pub fn aggregate_by_department(records: &[FinancialRecord]) -> Vec<DepartmentAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(&str, f64, f64)> = Vec::new();

    for record in records {
        let name = record.department.name.as_str();
        match index.get(name) {
            Some(&slot) => {
                totals[slot].1 += record.metrics.budget;
                totals[slot].2 += record.metrics.actual;
            }
            None => {
                index.insert(name, totals.len());
                totals.push((name, record.metrics.budget, record.metrics.actual));
            }
        }
    }

    totals
        .into_iter()
        .map(|(name, budget, actual)| DepartmentAggregate {
            name: name.to_string(),
            budget,
            actual,
            variance: actual - budget,
            variance_percentage: variance_percentage(budget, actual),
        })
        .collect()
}

/// Reject record sets whose sums leave the finite range.
///
/// Every record may be finite on its own while a department total or the
/// overall total overflows to infinity, and the percentages derived from
/// those totals turn into NaN. The error carries the index of the record
/// whose addition overflowed, or of the last record feeding a non-finite
/// derived value.
pub fn check_aggregates(records: &[FinancialRecord]) -> Result<()> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    // (name, budget, actual, index of last record)
    let mut totals: Vec<(&str, f64, f64, usize)> = Vec::new();
    let mut overall = (0.0_f64, 0.0_f64);

    for (i, record) in records.iter().enumerate() {
        let name = record.department.name.as_str();
        let slot = *index.entry(name).or_insert_with(|| {
            totals.push((name, 0.0, 0.0, i));
            totals.len() - 1
        });

        let dept = &mut totals[slot];
        dept.1 += record.metrics.budget;
        dept.2 += record.metrics.actual;
        dept.3 = i;
        overall.0 += record.metrics.budget;
        overall.1 += record.metrics.actual;

        if !(dept.1.is_finite() && dept.2.is_finite()) {
            return Err(Error::invalid_record(
                i,
                format!("totals for department '{}' overflow", name),
            ));
        }
        if !(overall.0.is_finite() && overall.1.is_finite()) {
            return Err(Error::invalid_record(i, "overall totals overflow"));
        }
    }

    for (name, budget, actual, last) in totals {
        if !derived_finite(budget, actual) {
            return Err(Error::invalid_record(
                last,
                format!("variance for department '{}' is not a finite number", name),
            ));
        }
    }
    if let Some(last) = records.len().checked_sub(1) {
        if !derived_finite(overall.0, overall.1) {
            return Err(Error::invalid_record(
                last,
                "overall variance is not a finite number",
            ));
        }
    }

    Ok(())
}

fn derived_finite(budget: f64, actual: f64) -> bool {
    (actual - budget).is_finite()
        && variance_percentage(budget, actual).is_finite()
        && efficiency(budget, actual).is_finite()
}

/// Distinct department names, in first-seen order
pub fn department_names(records: &[FinancialRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.department.name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Format an amount with thousands separators, e.g. `1,234,567` or `-20,000.5`
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, grouped)
    } else if cents % 10 == 0 {
        format!("{}{}.{}", sign, grouped, cents / 10)
    } else {
        format!("{}{}.{:02}", sign, grouped, cents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quarter;

    #[test]
    fn test_variance_percentage() {
        assert_eq!(variance_percentage(200_000.0, 240_000.0), 20.0);
        assert_eq!(variance_percentage(500_000.0, 520_000.0), 4.0);
        assert_eq!(variance_percentage(1000.0, 850.0), -15.0);
    }

    #[test]
    fn test_variance_percentage_zero_budget() {
        for actual in [0.0, 1.0, -5.0, 1e12] {
            assert_eq!(variance_percentage(0.0, actual), 0.0);
        }
    }

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(severity_from_variance(0.0), Severity::Low);
        assert_eq!(severity_from_variance(9.99), Severity::Low);
        assert_eq!(severity_from_variance(10.0), Severity::Medium);
        assert_eq!(severity_from_variance(-10.0), Severity::Medium);
        assert_eq!(severity_from_variance(14.99), Severity::Medium);
        assert_eq!(severity_from_variance(15.0), Severity::High);
        assert_eq!(severity_from_variance(19.99), Severity::High);
        assert_eq!(severity_from_variance(20.0), Severity::Critical);
        assert_eq!(severity_from_variance(-250.0), Severity::Critical);
    }

    #[test]
    fn test_risk_score() {
        assert_eq!(risk_score(4.0), 2.0);
        assert_eq!(risk_score(-15.0), 7.5);
        assert_eq!(risk_score(20.0), 10.0);
        assert_eq!(risk_score(80.0), 10.0);
    }

    #[test]
    fn test_performance_score() {
        assert_eq!(performance_score(0.0), 10.0);
        assert_eq!(performance_score(20.0), 8.0);
        assert_eq!(performance_score(-70.0), 3.0);
        assert_eq!(performance_score(150.0), 0.0);
    }

    #[test]
    fn test_efficiency() {
        assert_eq!(efficiency(100.0, 80.0), 125.0);
        assert_eq!(efficiency(100.0, 0.0), 0.0);
        assert_eq!(efficiency(100.0, -5.0), 0.0);
    }

    #[test]
    fn test_aggregate_sums_across_quarters() {
        let records = vec![
            FinancialRecord::new("Sales", 100.0, 120.0).with_period(2024, Quarter::Q1),
            FinancialRecord::new("IT", 50.0, 50.0),
            FinancialRecord::new("Sales", 300.0, 340.0).with_period(2024, Quarter::Q2),
        ];

        let depts = aggregate_by_department(&records);
        assert_eq!(depts.len(), 2);
        assert_eq!(depts[0].name, "Sales");
        assert_eq!(depts[0].budget, 400.0);
        assert_eq!(depts[0].actual, 460.0);
        assert_eq!(depts[0].variance, 60.0);
        assert_eq!(depts[0].variance_percentage, 15.0);
        assert_eq!(depts[1].name, "IT");
    }

    #[test]
    fn test_aggregate_zero_budget() {
        let depts = aggregate_by_department(&[FinancialRecord::new("Legal", 0.0, 9000.0)]);
        assert_eq!(depts[0].variance, 9000.0);
        assert_eq!(depts[0].variance_percentage, 0.0);
    }

    #[test]
    fn test_check_aggregates_accepts_large_finite_sums() {
        let records = vec![
            FinancialRecord::new("Sales", 1e300, 1e300),
            FinancialRecord::new("Sales", 1e300, 1e300),
            FinancialRecord::new("IT", 0.0, 0.0),
        ];
        assert!(check_aggregates(&records).is_ok());
        assert!(check_aggregates(&[]).is_ok());
    }

    #[test]
    fn test_check_aggregates_department_overflow() {
        let records = vec![
            FinancialRecord::new("IT", 10.0, 10.0),
            FinancialRecord::new("Ops", 1e308, 1e308),
            FinancialRecord::new("Ops", 1e308, 1e308),
        ];
        match check_aggregates(&records) {
            Err(Error::InvalidRecord { index, reason }) => {
                assert_eq!(index, 2);
                assert!(reason.contains("Ops"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_check_aggregates_overall_overflow() {
        // Each department is finite, the grand total is not
        let records = vec![
            FinancialRecord::new("A", 1e308, 1e308),
            FinancialRecord::new("B", 1e308, 1e308),
        ];
        match check_aggregates(&records) {
            Err(Error::InvalidRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, "overall totals overflow");
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_check_aggregates_derived_overflow() {
        // Sums are finite but the variance percentage is not
        let records = vec![FinancialRecord::new("Tiny", 1e-300, 1e300)];
        assert!(matches!(
            check_aggregates(&records),
            Err(Error::InvalidRecord { index: 0, .. })
        ));

        // Difference of two finite sums can overflow too
        let records = vec![FinancialRecord::new("Swing", -1e308, 1e308)];
        assert!(check_aggregates(&records).is_err());
    }

    #[test]
    fn test_department_names() {
        let records = vec![
            FinancialRecord::new("B", 1.0, 1.0),
            FinancialRecord::new("A", 1.0, 1.0),
            FinancialRecord::new("B", 1.0, 1.0),
        ];
        assert_eq!(department_names(&records), vec!["B", "A"]);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(240_000.0), "240,000");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
        assert_eq!(format_amount(-20_000.5), "-20,000.5");
        assert_eq!(format_amount(12.34), "12.34");
    }
}
