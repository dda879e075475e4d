//! Record file loaders (JSON and CSV)
//!
//! Both loaders report problems per record: a missing field or a metric that
//! isn't a number becomes [`Error::InvalidRecord`] carrying the 0-based index
//! of the offending record. Loaded records are validated before they are
//! returned, so callers never see a partial set.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{self, Category, Department, FinancialRecord, Metrics, Period, Quarter};

/// Supported record file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Csv,
}

impl RecordFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(RecordFormat::Json),
            "csv" => Some(RecordFormat::Csv),
            _ => None,
        }
    }
}

/// Load records from a `.json` or `.csv` file
pub fn load_file(path: &Path) -> Result<Vec<FinancialRecord>> {
    let format = RecordFormat::from_path(path).ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "Unsupported record file {} (expected .json or .csv)",
                path.display()
            ),
        ))
    })?;

    let reader = BufReader::new(File::open(path)?);
    match format {
        RecordFormat::Json => parse_json(reader),
        RecordFormat::Csv => parse_csv(reader),
    }
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    year: Option<i32>,
    quarter: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawMetrics {
    budget: Option<f64>,
    actual: Option<f64>,
    forecast: Option<f64>,
    #[serde(rename = "priorYear", alias = "prior_year")]
    prior_year: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    id: Option<String>,
    department: Option<RawNamed>,
    category: Option<RawNamed>,
    period: Option<RawPeriod>,
    metrics: Option<RawMetrics>,
}

/// Parse a JSON array of records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<FinancialRecord>> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;

    let records = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let raw: RawRecord = serde_json::from_value(value)
                .map_err(|e| Error::invalid_record(index, e.to_string()))?;
            convert_raw(index, raw)
        })
        .collect::<Result<Vec<_>>>()?;

    models::validate(&records)?;
    debug!("Parsed {} JSON records", records.len());
    Ok(records)
}

fn convert_raw(index: usize, raw: RawRecord) -> Result<FinancialRecord> {
    let missing = |field: &str| Error::invalid_record(index, format!("missing field `{}`", field));

    let department = named(raw.department, "department").map_err(|f| missing(&f))?;
    let category = named(raw.category, "category").map_err(|f| missing(&f))?;

    let period = raw.period.ok_or_else(|| missing("period"))?;
    let year = period.year.ok_or_else(|| missing("period.year"))?;
    let quarter = match period.quarter.ok_or_else(|| missing("period.quarter"))? {
        Value::String(s) => s.parse::<Quarter>(),
        Value::Number(n) => n.to_string().parse::<Quarter>(),
        other => Err(format!("Unknown quarter: {}", other)),
    }
    .map_err(|e| Error::invalid_record(index, e))?;

    let metrics = raw.metrics.ok_or_else(|| missing("metrics"))?;
    let metrics = Metrics {
        budget: metrics.budget.ok_or_else(|| missing("metrics.budget"))?,
        actual: metrics.actual.ok_or_else(|| missing("metrics.actual"))?,
        forecast: metrics.forecast.ok_or_else(|| missing("metrics.forecast"))?,
        prior_year: metrics
            .prior_year
            .ok_or_else(|| missing("metrics.priorYear"))?,
    };

    Ok(FinancialRecord {
        id: raw.id,
        department: Department {
            id: department.0,
            name: department.1,
        },
        category: Category {
            id: category.0,
            name: category.1,
        },
        period: Period::new(year, quarter),
        metrics,
    })
}

/// Resolve an `{id, name}` object; the id falls back to the name
fn named(raw: Option<RawNamed>, field: &str) -> std::result::Result<(String, String), String> {
    let raw = raw.ok_or_else(|| field.to_string())?;
    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| format!("{}.name", field))?;
    let id = raw.id.unwrap_or_else(|| name.clone());
    Ok((id, name))
}

/// Parse CSV records
///
/// Columns are matched by header name:
/// `department_id,department,category_id,category,year,quarter,budget,actual,forecast,prior_year`.
/// The two id columns are optional and default to the names.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<FinancialRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase(), i))
        .collect();

    let mut records = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let row = result?;

        let department = cell(&columns, &row, index, "department")?.to_string();
        let category = cell(&columns, &row, index, "category")?.to_string();
        let year = cell(&columns, &row, index, "year")?
            .parse::<i32>()
            .map_err(|_| Error::invalid_record(index, "field `year` is not an integer"))?;
        let quarter = cell(&columns, &row, index, "quarter")?
            .parse::<Quarter>()
            .map_err(|e| Error::invalid_record(index, e))?;

        records.push(FinancialRecord {
            id: None,
            department: Department {
                id: optional_cell(&columns, &row, "department_id")
                    .unwrap_or_else(|| department.clone()),
                name: department,
            },
            category: Category {
                id: optional_cell(&columns, &row, "category_id")
                    .unwrap_or_else(|| category.clone()),
                name: category,
            },
            period: Period::new(year, quarter),
            metrics: Metrics {
                budget: amount_cell(&columns, &row, index, "budget")?,
                actual: amount_cell(&columns, &row, index, "actual")?,
                forecast: amount_cell(&columns, &row, index, "forecast")?,
                prior_year: amount_cell(&columns, &row, index, "prior_year")?,
            },
        });
    }

    models::validate(&records)?;
    debug!("Parsed {} CSV records", records.len());
    Ok(records)
}

fn cell<'r>(
    columns: &HashMap<String, usize>,
    row: &'r StringRecord,
    index: usize,
    name: &str,
) -> Result<&'r str> {
    columns
        .get(name)
        .and_then(|&i| row.get(i))
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::invalid_record(index, format!("missing field `{}`", name)))
}

fn optional_cell(
    columns: &HashMap<String, usize>,
    row: &StringRecord,
    name: &str,
) -> Option<String> {
    columns
        .get(name)
        .and_then(|&i| row.get(i))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn amount_cell(
    columns: &HashMap<String, usize>,
    row: &StringRecord,
    index: usize,
    name: &str,
) -> Result<f64> {
    let raw = cell(columns, row, index, name)?;
    parse_amount(raw).ok_or_else(|| {
        Error::invalid_record(index, format!("field `{}` is not a number: {}", name, raw))
    })
}

/// Parse an amount like "$1,234.56" or "(100.00)"
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned.parse::<f64>().ok()
}
