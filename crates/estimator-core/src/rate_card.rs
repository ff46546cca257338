//! # Rate Card
//!
//! Standard day rates per role and seniority level.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  Role            TEAM_LEAD     SENIOR       JUNIOR        │
//! │  ─────────────   ──────────   ──────────   ──────────     │
//! │  Developer       12,000       9,000        5,000          │
//! │  Designer        10,000       8,000        4,500 (off)    │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Only active tiers are quoted. A person whose rate source is
//! `RATE_CARD` takes the tier price; a `CUSTOM` person keeps their own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Seniority level a rate tier is priced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleLevel {
    TeamLead,
    Senior,
    Junior,
}

/// Where a project person's day rate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateSource {
    /// Looked up from the rate card by role and level.
    RateCard,
    /// Entered by hand on the project.
    #[default]
    Custom,
}

/// One role/level price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RateCardTier {
    pub id: String,
    pub role_id: String,
    pub level: RoleLevel,
    #[ts(type = "number")]
    pub price_per_day: Decimal,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RateCardRole {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tiers: Vec<RateCardTier>,
}

/// The full set of roles and their tiers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RateCard {
    pub roles: Vec<RateCardRole>,
}

impl RateCard {
    pub fn new(roles: Vec<RateCardRole>) -> Self {
        RateCard { roles }
    }

    /// Finds a role by its identifier.
    pub fn role(&self, role_id: &str) -> Option<&RateCardRole> {
        self.roles.iter().find(|role| role.id == role_id)
    }

    /// Day rate of the active tier for `role_id` at `level`.
    ///
    /// ## Example
    /// ```rust
    /// use estimator_core::rate_card::{RateCard, RateCardRole, RateCardTier, RoleLevel};
    /// use rust_decimal::Decimal;
    ///
    /// let card = RateCard::new(vec![RateCardRole {
    ///     id: "dev".into(),
    ///     name: "Developer".into(),
    ///     tiers: vec![RateCardTier {
    ///         id: "dev-sr".into(),
    ///         role_id: "dev".into(),
    ///         level: RoleLevel::Senior,
    ///         price_per_day: Decimal::from(9000),
    ///         active: true,
    ///     }],
    /// }]);
    ///
    /// assert_eq!(card.price_for("dev", RoleLevel::Senior), Some(Decimal::from(9000)));
    /// assert_eq!(card.price_for("dev", RoleLevel::Junior), None);
    /// ```
    pub fn price_for(&self, role_id: &str, level: RoleLevel) -> Option<Decimal> {
        self.role(role_id)?
            .tiers
            .iter()
            .find(|tier| tier.active && tier.level == level)
            .map(|tier| tier.price_per_day)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
