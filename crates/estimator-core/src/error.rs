//! # Error Types
//!
//! Domain-specific error types for estimator-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  estimator-core errors (this file)                                     │
//! │  ├── CoreError        - Failures of the checked entry points           │
//! │  └── ValidationError  - One domain-rule violation of an input          │
//! │                                                                         │
//! │  estimator-cli errors (app)                                            │
//! │  ├── ConfigError      - Bad environment configuration                  │
//! │  └── anyhow::Error    - Process-level failures (I/O, JSON)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow → stderr + exit code       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (row number, dates)
//! 3. Errors are enum variants, never String
//! 4. The `Display` text of a [`ValidationError`] is the message shown to users

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the checked entry points of this crate.
///
/// The plain calculators never fail; these come from the wrappers that
/// validate first or from project-level lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The calculation input broke one or more domain rules.
    ///
    /// ## User Workflow
    /// ```text
    /// Summary requested
    ///      │
    ///      ▼
    /// check_calculation_input() → [TargetMarginOutOfRange]
    ///      │
    ///      ▼
    /// InvalidInput([...])  ← pricing never runs
    ///      │
    ///      ▼
    /// UI shows: "Target margin must be between 0 and 100"
    /// ```
    #[error("Invalid calculation input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A calendar-mode project is missing its start or end date.
    #[error("Project {project} uses calendar mode but has no {missing} date")]
    MissingDates {
        project: String,
        missing: &'static str,
    },

    /// A strict date range was built with its ends reversed.
    #[error("Date range start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A project summary was requested for a project that has no identifier.
    #[error("Project {0} has no identifier to key its summary by")]
    MissingProjectId(String),

    /// A working-week name was not one of MON_FRI, MON_SAT, SUN_THU.
    #[error("Unknown working week: {0}")]
    UnknownWorkingWeek(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single domain-rule violation found in a calculation input.
///
/// Row numbers are 1-indexed, matching what a user sees in the people table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input has no person rows at all.
    #[error("At least one person row is required")]
    NoRows,

    /// A row's day rate is zero or negative.
    #[error("Row {row}: Price per day must be greater than 0")]
    PriceNotPositive { row: usize },

    #[error("Row {row}: Allocated days cannot be negative")]
    NegativeAllocatedDays { row: usize },

    #[error("Row {row}: Utilization must be between 0 and 100")]
    UtilizationOutOfRange { row: usize },

    #[error("Row {row}: Weekend multiplier cannot be negative")]
    NegativeWeekendMultiplier { row: usize },

    #[error("Row {row}: Holiday multiplier cannot be negative")]
    NegativeHolidayMultiplier { row: usize },

    /// Tax is enabled with a percentage outside 0..=100.
    #[error("Tax percentage must be between 0 and 100")]
    TaxPercentOutOfRange,

    #[error("Target ROI cannot be negative")]
    NegativeTargetRoi,

    /// Target margin outside `[0, 100)`. 100 itself would divide by zero.
    #[error("Target margin must be between 0 and 100")]
    TargetMarginOutOfRange,

    /// Every field is in range, but the totals exceed what a `Decimal` holds.
    #[error("Amounts are too large to calculate")]
    AmountOutOfRange,
}

impl ValidationError {
    /// The 1-indexed row this violation belongs to, if it is a row rule.
    pub fn row(&self) -> Option<usize> {
        match *self {
            ValidationError::PriceNotPositive { row }
            | ValidationError::NegativeAllocatedDays { row }
            | ValidationError::UtilizationOutOfRange { row }
            | ValidationError::NegativeWeekendMultiplier { row }
            | ValidationError::NegativeHolidayMultiplier { row } => Some(row),
            _ => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::NoRows.to_string(),
            "At least one person row is required"
        );
        assert_eq!(
            ValidationError::PriceNotPositive { row: 1 }.to_string(),
            "Row 1: Price per day must be greater than 0"
        );
        assert_eq!(
            ValidationError::NegativeHolidayMultiplier { row: 3 }.to_string(),
            "Row 3: Holiday multiplier cannot be negative"
        );
        assert_eq!(
            ValidationError::TargetMarginOutOfRange.to_string(),
            "Target margin must be between 0 and 100"
        );
        assert_eq!(
            ValidationError::AmountOutOfRange.to_string(),
            "Amounts are too large to calculate"
        );
    }

    #[test]
    fn test_invalid_input_joins_messages() {
        let err = CoreError::InvalidInput(vec![
            ValidationError::NoRows,
            ValidationError::NegativeTargetRoi,
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid calculation input: At least one person row is required; Target ROI cannot be negative"
        );
    }

    #[test]
    fn test_row_accessor() {
        assert_eq!(
            ValidationError::UtilizationOutOfRange { row: 2 }.row(),
            Some(2)
        );
        assert_eq!(ValidationError::TaxPercentOutOfRange.row(), None);
    }

    #[test]
    fn test_date_range_message() {
        let err = CoreError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Date range start 2024-01-05 is after end 2024-01-01"
        );
    }
}
