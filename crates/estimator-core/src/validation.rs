//! # Validation Module
//!
//! Domain-rule checks for a [`CalculationInput`], run before pricing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form / request schema (out of this repo)                 │
//! │  ├── Required fields, types                                            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Every rule checked independently                                  │
//! │  └── Every violation reported, not just the first                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: calculate_totals                                             │
//! │  └── Assumes layer 2 passed (MARGIN at 100% has no finite price)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estimator_core::{validate_calculation_input, CalculationInput};
//!
//! let errors = validate_calculation_input(&CalculationInput::default());
//! assert_eq!(errors, vec!["At least one person row is required".to_string()]);
//! ```

use rust_decimal::Decimal;

use crate::calculations::checked_totals;
use crate::error::ValidationError;
use crate::money::HUNDRED;
use crate::types::{CalculationInput, PersonRow, PricingMode};

/// Checks a calculation input and returns every rule it breaks.
///
/// An empty vector means the input is valid. Never panics.
///
/// ## Rules
/// - at least one row
/// - per row: price > 0, days >= 0, utilization in 0..=100,
///   multipliers (when present) >= 0
/// - tax in 0..=100 when tax is enabled
/// - ROI mode: target ROI (when present) >= 0
/// - MARGIN mode: target margin (when present) in `[0, 100)`
/// - when all of the above hold, the totals fit in a `Decimal`
pub fn check_calculation_input(input: &CalculationInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if input.rows.is_empty() {
        errors.push(ValidationError::NoRows);
    }

    for (index, row) in input.rows.iter().enumerate() {
        check_row(index + 1, row, &mut errors);
    }

    if input.tax_enabled && !is_percentage(input.tax_percent) {
        errors.push(ValidationError::TaxPercentOutOfRange);
    }

    match input.pricing_mode {
        PricingMode::Roi => {
            if matches!(input.target_roi, Some(roi) if roi < Decimal::ZERO) {
                errors.push(ValidationError::NegativeTargetRoi);
            }
        }
        PricingMode::Margin => {
            if matches!(input.target_margin, Some(margin) if margin < Decimal::ZERO || margin >= HUNDRED)
            {
                errors.push(ValidationError::TargetMarginOutOfRange);
            }
        }
        PricingMode::Direct | PricingMode::Unknown => {}
    }

    // Only meaningful once the field rules hold.
    if errors.is_empty() && checked_totals(input).is_none() {
        errors.push(ValidationError::AmountOutOfRange);
    }

    errors
}

/// Checks a calculation input and returns the human-readable messages.
///
/// Same rules as [`check_calculation_input`]; each message is the
/// `Display` text of one [`ValidationError`], rows numbered from 1.
pub fn validate_calculation_input(input: &CalculationInput) -> Vec<String> {
    check_calculation_input(input)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn check_row(row_number: usize, row: &PersonRow, errors: &mut Vec<ValidationError>) {
    if row.price_per_day <= Decimal::ZERO {
        errors.push(ValidationError::PriceNotPositive { row: row_number });
    }

    if row.allocated_days < Decimal::ZERO {
        errors.push(ValidationError::NegativeAllocatedDays { row: row_number });
    }

    if !is_percentage(row.utilization_percent) {
        errors.push(ValidationError::UtilizationOutOfRange { row: row_number });
    }

    if matches!(row.weekend_multiplier, Some(m) if m < Decimal::ZERO) {
        errors.push(ValidationError::NegativeWeekendMultiplier { row: row_number });
    }

    if matches!(row.holiday_multiplier, Some(m) if m < Decimal::ZERO) {
        errors.push(ValidationError::NegativeHolidayMultiplier { row: row_number });
    }
}

#[inline]
fn is_percentage(value: Decimal) -> bool {
    (Decimal::ZERO..=HUNDRED).contains(&value)
}

// =============================================================================
// Unit Tests
// =============================================================================
