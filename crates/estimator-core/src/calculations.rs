//! # Totals Calculator
//!
//! Derives subtotal, tax, cost, proposed price, ROI% and margin% from the
//! person rows and the pricing mode of a [`CalculationInput`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        calculate_totals                                 │
//! │                                                                         │
//! │  rows ──► skip non-billable ──► rate × days × util% × multipliers      │
//! │                                          │                              │
//! │                                          ▼ Σ                            │
//! │                                      subtotal                           │
//! │                                          │                              │
//! │                     tax_enabled? ──► tax = subtotal × tax%              │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                cost = subtotal + tax                    │
//! │                                          │                              │
//! │        ┌─────────────────┬───────────────┴──┬──────────────────┐       │
//! │        ▼                 ▼                  ▼                  ▼       │
//! │     DIRECT              ROI              MARGIN             Unknown    │
//! │  proposed or cost  cost×(1+roi%)    cost/(1−margin%)         cost      │
//! │        └─────────────────┴───────────────┬──┴──────────────────┘       │
//! │                                          ▼                              │
//! │                   roi% = (p−c)/c   margin% = (p−c)/p                   │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                          round every figure to 2 places                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All intermediate math is `Decimal`. Row costs are summed unrounded;
//! subtotal and tax are rounded before they are added into cost, and the
//! price and ratios are rounded last.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::{percent, round_money, HUNDRED};
use crate::types::{CalculationInput, CalculationResult, PricingMode};
use crate::validation::check_calculation_input;

/// Calculates project totals for the given input.
///
/// Pure and total: it never panics and never fails. Out-of-range values
/// produce mathematically defined but meaningless figures, so callers should
/// run [`check_calculation_input`] first, or use [`calculate_checked`].
/// Amounts too large for a `Decimal` yield an all-zero result and a `warn!`
/// event; the validator reports those inputs as
/// [`ValidationError::AmountOutOfRange`](crate::ValidationError::AmountOutOfRange).
///
/// ## Example
/// ```rust
/// use estimator_core::{calculate_totals, CalculationInput, PersonRow, PricingMode};
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput {
///     rows: vec![PersonRow::new(Decimal::from(100), Decimal::from(10), Decimal::from(100))],
///     pricing_mode: PricingMode::Margin,
///     target_margin: Some(Decimal::from(25)),
///     ..Default::default()
/// };
///
/// let totals = calculate_totals(&input);
/// assert_eq!(totals.proposed, Decimal::new(133333, 2)); // 1333.33
/// assert_eq!(totals.margin_percent, Decimal::from(25));
/// ```
pub fn calculate_totals(input: &CalculationInput) -> CalculationResult {
    checked_totals(input).unwrap_or_else(|| {
        warn!(
            rows = input.rows.len(),
            mode = ?input.pricing_mode,
            "Amounts exceed the decimal range, returning zero totals"
        );
        CalculationResult::default()
    })
}

/// Validates the input, then calculates totals.
///
/// ## Returns
/// - `Ok(result)` when the validator reports nothing
/// - `Err(CoreError::InvalidInput(errors))` with every violation otherwise
pub fn calculate_checked(input: &CalculationInput) -> CoreResult<CalculationResult> {
    let errors = check_calculation_input(input);
    if !errors.is_empty() {
        debug!(count = errors.len(), "Rejected calculation input");
        return Err(CoreError::InvalidInput(errors));
    }

    Ok(calculate_totals(input))
}

/// The totals pipeline with overflow-checked arithmetic.
///
/// `None` when any amount or ratio does not fit in a `Decimal`.
pub(crate) fn checked_totals(input: &CalculationInput) -> Option<CalculationResult> {
    let raw_subtotal = input
        .billable_rows()
        .try_fold(Decimal::ZERO, |sum, row| sum.checked_add(row.billable_cost()?))?;

    // Cost is built from the rounded figures so that cost == subtotal + tax
    // holds to the cent on the output.
    let subtotal = round_money(raw_subtotal);
    let tax = round_money(raw_subtotal.checked_mul(input.tax_rate())?);
    let cost = subtotal.checked_add(tax)?;

    // Price and ratios derive from the rounded cost. Against pricing on the
    // raw cost this can move the quote by a cent, and that is intended.
    let proposed = proposed_price(input, cost)?;
    let profit = proposed.checked_sub(cost)?;

    let roi_percent = if cost.is_zero() {
        Decimal::ZERO
    } else {
        profit.checked_div(cost)?.checked_mul(HUNDRED)?
    };

    let margin_percent = if proposed.is_zero() {
        Decimal::ZERO
    } else {
        profit.checked_div(proposed)?.checked_mul(HUNDRED)?
    };

    debug!(
        rows = input.rows.len(),
        mode = ?input.pricing_mode,
        %subtotal,
        %cost,
        %proposed,
        "Calculated totals"
    );

    Some(CalculationResult {
        subtotal,
        tax,
        cost,
        proposed: round_money(proposed),
        roi_percent: round_money(roi_percent),
        margin_percent: round_money(margin_percent),
    })
}

/// Price quoted to the client for the given cost, per pricing mode.
///
/// Absent and zero targets both mean "price at cost". `None` on overflow.
fn proposed_price(input: &CalculationInput, cost: Decimal) -> Option<Decimal> {
    match input.pricing_mode {
        PricingMode::Direct => match input.proposed {
            Some(proposed) if !proposed.is_zero() => Some(proposed),
            _ => Some(cost),
        },

        PricingMode::Roi => match input.target_roi {
            Some(roi) if !roi.is_zero() => {
                cost.checked_mul(Decimal::ONE.checked_add(percent(roi))?)
            }
            _ => Some(cost),
        },

        PricingMode::Margin => match input.target_margin {
            Some(margin) if !margin.is_zero() => {
                let divisor = Decimal::ONE.checked_sub(percent(margin))?;
                // A 100% margin has no finite price.
                if divisor.is_zero() {
                    warn!(%margin, "Target margin leaves no divisor, pricing at cost");
                    return Some(cost);
                }
                cost.checked_div(divisor)
            }
            _ => Some(cost),
        },

        PricingMode::Unknown => Some(cost),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
