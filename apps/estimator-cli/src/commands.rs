//! Command handlers. Each one reads its JSON input, calls into
//! estimator-core and returns what should be printed.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use estimator_core::money::{format_currency, format_days, format_percentage};
use estimator_core::{
    calculate_business_days, calculate_checked, check_calculation_input, summarize_project,
    CalculationInput, CoreError, Project, ProjectSummary, ValidationError, WorkingWeek,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// What a command produced.
#[derive(Debug)]
pub enum Outcome {
    /// Print as JSON on stdout, exit 0.
    Json(serde_json::Value),
    /// Print as a line on stdout, exit 0.
    Text(String),
    /// Print each message on stderr, exit 1.
    Rejected(Vec<String>),
}

pub fn totals(input: &CalculationInput) -> Result<Outcome> {
    match calculate_checked(input) {
        Ok(result) => to_json(&result),
        Err(CoreError::InvalidInput(errors)) => Ok(rejected(errors)),
        Err(other) => Err(other.into()),
    }
}

pub fn summary(project: &Project, human: bool) -> Result<Outcome> {
    match summarize_project(project) {
        Ok(summary) => {
            info!(project_id = %summary.project_id, "Project summarized");
            if human {
                let days = Decimal::from(project.business_days()?);
                Ok(Outcome::Text(describe(project, &summary, days)))
            } else {
                to_json(&summary)
            }
        }
        Err(CoreError::InvalidInput(errors)) => Ok(rejected(errors)),
        Err(other) => Err(other.into()),
    }
}

pub fn validate(input: &CalculationInput) -> Outcome {
    let errors = check_calculation_input(input);
    if errors.is_empty() {
        Outcome::Text("valid".to_string())
    } else {
        rejected(errors)
    }
}

pub fn days(start: NaiveDate, end: NaiveDate, week: WorkingWeek, holidays: &[NaiveDate]) -> Outcome {
    let count = calculate_business_days(start, end, week, holidays);
    debug!(%start, %end, %week, holidays = holidays.len(), count, "Counted business days");
    Outcome::Text(count.to_string())
}

/// Reads and parses a JSON document from `path`, or stdin for `None`/`-`.
pub fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let (raw, source) = match path {
        Some(p) if p != Path::new("-") => (
            fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display()))?,
            p.display().to_string(),
        ),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            (buf, "stdin".to_string())
        }
    };

    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {source}"))
}

/// Renders a summary the way the project page shows it.
fn describe(project: &Project, summary: &ProjectSummary, days: Decimal) -> String {
    let symbol = project.currency_symbol.as_str();
    format!(
        "{name} ({days})\n  Subtotal: {subtotal}\n  Tax:      {tax}\n  Cost:     {cost}\n  Proposed: {proposed}\n  ROI {roi} / Margin {margin}",
        name = project.name,
        days = format_days(days),
        subtotal = format_currency(summary.subtotal, symbol),
        tax = format_currency(summary.tax, symbol),
        cost = format_currency(summary.cost, symbol),
        proposed = format_currency(summary.proposed_price, symbol),
        roi = format_percentage(summary.roi_percent),
        margin = format_percentage(summary.margin_percent),
    )
}

fn to_json<T: Serialize>(value: &T) -> Result<Outcome> {
    Ok(Outcome::Json(serde_json::to_value(value)?))
}

fn rejected(errors: Vec<ValidationError>) -> Outcome {
    Outcome::Rejected(errors.iter().map(ToString::to_string).collect())
}
