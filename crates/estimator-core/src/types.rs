//! # Calculation Types
//!
//! The plain data the pricing engine consumes and produces.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Calculation Types                                │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                │
//! │  │  CalculationInput   │        │  CalculationResult  │                │
//! │  │  ─────────────────  │        │  ─────────────────  │                │
//! │  │  rows ──────────────┼──┐     │  subtotal           │                │
//! │  │  tax_enabled        │  │     │  tax                │                │
//! │  │  tax_percent        │  │     │  cost               │                │
//! │  │  pricing_mode       │  │     │  proposed           │                │
//! │  │  proposed?          │  │     │  roi_percent        │                │
//! │  │  target_roi?        │  │     │  margin_percent     │                │
//! │  │  target_margin?     │  │     └─────────────────────┘                │
//! │  └─────────────────────┘  │                                             │
//! │                           ▼                                             │
//! │                 ┌─────────────────────┐   ┌─────────────────┐          │
//! │                 │     PersonRow       │   │   PricingMode   │          │
//! │                 │  ─────────────────  │   │  ─────────────  │          │
//! │                 │  price_per_day      │   │  Direct         │          │
//! │                 │  allocated_days     │   │  Roi            │          │
//! │                 │  utilization_percent│   │  Margin         │          │
//! │                 │  non_billable       │   └─────────────────┘          │
//! │                 │  weekend_multiplier?│                                 │
//! │                 │  holiday_multiplier?│   ? = Option, absent ≠ zero    │
//! │                 └─────────────────────┘                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Field names are camelCase on the wire (`pricePerDay`, `targetROI`) and
//! decimals travel as JSON numbers, matching the records the web
//! application stores.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{percent, HUNDRED};

// =============================================================================
// Pricing Mode
// =============================================================================

/// Selects the formula that derives the proposed price from cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    /// Explicit price, falling back to cost when none is given.
    #[default]
    Direct,
    /// `cost × (1 + target_roi / 100)`.
    Roi,
    /// `cost / (1 − target_margin / 100)`.
    Margin,
    /// Any mode name this version does not know. Priced at cost.
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Person Row
// =============================================================================

/// One team allocation line within a calculation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonRow {
    /// Day rate in currency units.
    #[ts(type = "number")]
    pub price_per_day: Decimal,

    /// Days assigned to this person.
    #[ts(type = "number")]
    pub allocated_days: Decimal,

    /// Share of allocated days actually billed, 0-100.
    #[ts(type = "number")]
    pub utilization_percent: Decimal,

    /// Non-billable rows are skipped entirely by the totals calculator.
    #[serde(default)]
    pub non_billable: bool,

    /// Premium applied to the row cost. `None` means no multiplier at all,
    /// which is not the same as `Some(1)` or `Some(0)`.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub weekend_multiplier: Option<Decimal>,

    /// Compounds with `weekend_multiplier` when both are present.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub holiday_multiplier: Option<Decimal>,
}

impl PersonRow {
    /// Creates a billable row with no multipliers.
    pub fn new(price_per_day: Decimal, allocated_days: Decimal, utilization_percent: Decimal) -> Self {
        PersonRow {
            price_per_day,
            allocated_days,
            utilization_percent,
            ..Default::default()
        }
    }

    /// Marks the row as non-billable.
    pub fn non_billable(mut self) -> Self {
        self.non_billable = true;
        self
    }

    pub fn with_weekend_multiplier(mut self, multiplier: Decimal) -> Self {
        self.weekend_multiplier = Some(multiplier);
        self
    }

    pub fn with_holiday_multiplier(mut self, multiplier: Decimal) -> Self {
        self.holiday_multiplier = Some(multiplier);
        self
    }

    /// Days actually billed: `allocated_days × utilization_percent / 100`.
    ///
    /// `None` when the product does not fit in a `Decimal`.
    #[inline]
    pub fn effective_days(&self) -> Option<Decimal> {
        self.allocated_days
            .checked_mul(self.utilization_percent)?
            .checked_div(HUNDRED)
    }

    /// What this row adds to the subtotal, multipliers included.
    ///
    /// `None` when any step overflows `Decimal`.
    ///
    /// ## Example
    /// ```rust
    /// use estimator_core::PersonRow;
    /// use rust_decimal::Decimal;
    ///
    /// let row = PersonRow::new(Decimal::from(100), Decimal::from(10), Decimal::from(100))
    ///     .with_weekend_multiplier(Decimal::new(15, 1))
    ///     .with_holiday_multiplier(Decimal::from(2));
    /// assert_eq!(row.billable_cost(), Some(Decimal::from(3000)));
    ///
    /// assert_eq!(row.non_billable().billable_cost(), Some(Decimal::ZERO));
    /// ```
    pub fn billable_cost(&self) -> Option<Decimal> {
        if self.non_billable {
            return Some(Decimal::ZERO);
        }

        let mut cost = self.price_per_day.checked_mul(self.effective_days()?)?;
        if let Some(weekend) = self.weekend_multiplier {
            cost = cost.checked_mul(weekend)?;
        }
        if let Some(holiday) = self.holiday_multiplier {
            cost = cost.checked_mul(holiday)?;
        }
        Some(cost)
    }
}

// =============================================================================
// Calculation Input
// =============================================================================

/// Everything the totals calculator needs, assembled fresh for every call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Row order only matters for the row numbers in validation messages.
    pub rows: Vec<PersonRow>,

    pub tax_enabled: bool,

    /// Applied to the subtotal only when `tax_enabled` is set.
    #[serde(default)]
    #[ts(type = "number")]
    pub tax_percent: Decimal,

    pub pricing_mode: PricingMode,

    /// DIRECT mode override of the computed price.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub proposed: Option<Decimal>,

    /// ROI mode target, in percent.
    #[serde(default, rename = "targetROI")]
    #[ts(type = "number | null")]
    pub target_roi: Option<Decimal>,

    /// MARGIN mode target, in percent. Must stay below 100.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub target_margin: Option<Decimal>,
}

impl CalculationInput {
    /// Tax fraction in effect (zero when tax is disabled).
    #[inline]
    pub fn tax_rate(&self) -> Decimal {
        if self.tax_enabled {
            percent(self.tax_percent)
        } else {
            Decimal::ZERO
        }
    }

    /// Rows that contribute to the subtotal.
    pub fn billable_rows(&self) -> impl Iterator<Item = &PersonRow> {
        self.rows.iter().filter(|row| !row.non_billable)
    }
}

// =============================================================================
// Calculation Result
// =============================================================================

/// Output of the totals calculator. Every figure is rounded to 2 places.
///
/// Invariant: `cost == subtotal + tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    #[ts(type = "number")]
    pub subtotal: Decimal,
    #[ts(type = "number")]
    pub tax: Decimal,
    #[ts(type = "number")]
    pub cost: Decimal,
    #[ts(type = "number")]
    pub proposed: Decimal,
    #[ts(type = "number")]
    pub roi_percent: Decimal,
    #[ts(type = "number")]
    pub margin_percent: Decimal,
}

impl CalculationResult {
    /// Profit on the quote: `proposed − cost`.
    #[inline]
    pub fn profit(&self) -> Decimal {
        self.proposed - self.cost
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
