//! # Money Module
//!
//! Decimal helpers shared by the calculators: percentage scaling, the one
//! rounding rule used for every output, and display formatting.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cost sheet chains many of these:                                     │
//! │    rate × days × utilization × multipliers, summed, taxed, marked up   │
//! │    → cent-level drift on the quoted price                              │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    Base-10 fixed point, 28 significant digits                          │
//! │    Rounded to 2 places exactly once, at the output boundary            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estimator_core::money::{format_currency, percent, round_money};
//! use rust_decimal::Decimal;
//!
//! let subtotal = Decimal::from(1000);
//! let tax = subtotal * percent(Decimal::from(7)); // 70
//! assert_eq!(round_money(tax), Decimal::from(70));
//! assert_eq!(format_currency(subtotal + tax, "฿"), "฿1,070.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

use crate::RESULT_DECIMAL_PLACES;

/// One hundred, the denominator of every percentage.
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Arithmetic Helpers
// =============================================================================

/// Converts a percentage (0-100) to a fraction (0-1).
///
/// ## Example
/// ```rust
/// use estimator_core::money::percent;
/// use rust_decimal::Decimal;
///
/// assert_eq!(percent(Decimal::from(25)), Decimal::new(25, 2)); // 0.25
/// ```
#[inline]
pub fn percent(value: Decimal) -> Decimal {
    value / HUNDRED
}

/// Rounds a figure to 2 fraction digits, half away from zero.
///
/// ## Rounding Explained
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  ROUND HALF AWAY FROM ZERO                                          │
/// │                                                                     │
/// │    1333.333… → 1333.33                                              │
/// │       0.125  →    0.13                                              │
/// │      -0.125  →   -0.13                                              │
/// │                                                                     │
/// │  Matches the rounding quotes were historically produced with, so   │
/// │  stored summaries and recalculated ones agree to the cent.         │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RESULT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount with a currency symbol, thousands separators and
/// exactly 2 fraction digits.
///
/// The sign follows the symbol: `฿-1,000.00`.
///
/// ## Example
/// ```rust
/// use estimator_core::money::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(133333, 2), "฿"), "฿1,333.33");
/// assert_eq!(format_currency(Decimal::ZERO, "$"), "$0.00");
/// ```
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let fixed = format!("{:.2}", rounded.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{symbol}{sign}{}.{fraction}", group_thousands(whole))
}

/// Formats a percentage with 2 fraction digits: `25.00%`.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", round_money(value))
}

/// Formats a day count: `1 day`, `0 days`, `2.5 days`.
pub fn format_days(days: Decimal) -> String {
    if days == Decimal::ONE {
        "1 day".to_string()
    } else {
        format!("{} days", days.normalize())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
