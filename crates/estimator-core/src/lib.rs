//! # estimator-core: Pure Pricing Logic for Project Estimator
//!
//! This crate is the **heart** of Project Estimator. It turns a project's
//! person-allocation rows into subtotal, tax, cost, proposed price, ROI% and
//! margin%, counts business days, and checks inputs before they are priced.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Project Estimator Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Web Application (out of this repo)               │   │
//! │  │   Projects ──► People ──► Rate Card ──► Holidays ──► Summary    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (CalculationInput / Project)      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ estimator-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────┐  ┌────────────┐  ┌────────────┐  ┌─────────┐  │   │
//! │  │  │calculations │  │  calendar  │  │ validation │  │ project │  │   │
//! │  │  │  subtotal   │  │  business  │  │  per-row   │  │ summary │  │   │
//! │  │  │  tax, ROI   │  │    days    │  │   checks   │  │rate card│  │   │
//! │  │  └─────────────┘  └────────────┘  └────────────┘  └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Calculation input/output types (PersonRow, CalculationInput, ...)
//! - [`calculations`] - Totals calculator and the pricing modes
//! - [`calendar`] - Working-week policies and business-day counting
//! - [`validation`] - Domain-rule checks run before pricing
//! - [`project`] - Stored project aggregate and its summary record
//! - [`rate_card`] - Role/level price tiers
//! - [`money`] - Decimal rounding and display formatting
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe to call from any thread
//! 2. **No I/O**: persistence and transport belong to the caller
//! 3. **Decimal Money**: every amount is a `rust_decimal::Decimal`, never `f64`
//! 4. **Absent is not zero**: optional multipliers and targets are `Option`
//!
//! ## Example Usage
//!
//! ```rust
//! use estimator_core::{calculate_totals, validate_calculation_input};
//! use estimator_core::{CalculationInput, PersonRow, PricingMode};
//! use rust_decimal::Decimal;
//!
//! let input = CalculationInput {
//!     rows: vec![PersonRow::new(Decimal::from(100), Decimal::from(10), Decimal::from(100))],
//!     pricing_mode: PricingMode::Roi,
//!     target_roi: Some(Decimal::from(20)),
//!     ..Default::default()
//! };
//!
//! assert!(validate_calculation_input(&input).is_empty());
//!
//! let totals = calculate_totals(&input);
//! assert_eq!(totals.cost, Decimal::from(1000));
//! assert_eq!(totals.proposed, Decimal::from(1200));
//! assert_eq!(totals.roi_percent, Decimal::from(20));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculations;
pub mod calendar;
pub mod error;
pub mod money;
pub mod project;
pub mod rate_card;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use estimator_core::calculate_totals` instead of
// `use estimator_core::calculations::calculate_totals`

pub use calculations::{calculate_checked, calculate_totals};
pub use calendar::{calculate_business_days, DateRange, WorkingWeek};
pub use error::{CoreError, CoreResult, ValidationError};
pub use project::{summarize_project, Project, ProjectSummary};
pub use rate_card::{RateCard, RoleLevel};
pub use types::*;
pub use validation::{check_calculation_input, validate_calculation_input};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of fraction digits on every figure of a [`CalculationResult`].
pub const RESULT_DECIMAL_PLACES: u32 = 2;

/// Currency symbol used when a project does not carry one.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "฿";
