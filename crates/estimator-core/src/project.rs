//! # Project Aggregate
//!
//! The stored project record, as handed over by the persistence layer, and
//! the summary record it gets back.
//!
//! ## Summary Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Project (people, pricing settings, holidays)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calculation_input() ── people → PersonRow, 1:1                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calculate_checked() ── validator, then totals                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProjectSummary  ── upserted by the caller, keyed by project id        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Holiday Treatments
//! - `EXCLUDE`: the day is not worked, removed from business days
//! - `BILLABLE_MULTIPLIER`: the day is worked at a premium
//! - `INFO`: shown on the calendar only

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::calculations::calculate_checked;
use crate::calendar::{calculate_business_days, WorkingWeek};
use crate::error::{CoreError, CoreResult};
use crate::rate_card::{RateCard, RateSource, RoleLevel};
use crate::types::{CalculationInput, CalculationResult, PersonRow, PricingMode};
use crate::DEFAULT_CURRENCY_SYMBOL;

// =============================================================================
// Holiday
// =============================================================================

/// How a project holiday affects the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayTreatment {
    #[default]
    Exclude,
    BillableMultiplier,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHoliday {
    #[serde(default)]
    pub id: Option<String>,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub treatment: HolidayTreatment,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub holiday_multiplier: Option<Decimal>,
}

// =============================================================================
// Project Person
// =============================================================================

/// A stored allocation row: who, at what rate, for how long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPerson {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub team_member_id: Option<String>,
    pub person_label: String,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub level: Option<RoleLevel>,
    #[serde(default)]
    pub rate_source: RateSource,
    #[ts(type = "number")]
    pub price_per_day: Decimal,
    #[ts(type = "number")]
    pub allocated_days: Decimal,
    #[ts(type = "number")]
    pub utilization_percent: Decimal,
    #[serde(default)]
    pub non_billable: bool,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub weekend_multiplier: Option<Decimal>,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub holiday_multiplier: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ProjectPerson {
    /// The calculation row for this person, with their stored day rate.
    pub fn to_row(&self) -> PersonRow {
        self.row_at(self.price_per_day)
    }

    /// The calculation row for this person, priced from `rate_card` when
    /// their rate source says so.
    pub fn to_row_with(&self, rate_card: &RateCard) -> PersonRow {
        self.row_at(self.resolve_price(rate_card))
    }

    /// Day rate in effect: the rate-card tier for `RATE_CARD` people when
    /// one is active for their role and level, else the stored rate.
    pub fn resolve_price(&self, rate_card: &RateCard) -> Decimal {
        if self.rate_source != RateSource::RateCard {
            return self.price_per_day;
        }

        match (self.role_id.as_deref(), self.level) {
            (Some(role_id), Some(level)) => rate_card
                .price_for(role_id, level)
                .unwrap_or(self.price_per_day),
            _ => self.price_per_day,
        }
    }

    fn row_at(&self, price_per_day: Decimal) -> PersonRow {
        PersonRow {
            price_per_day,
            allocated_days: self.allocated_days,
            utilization_percent: self.utilization_percent,
            non_billable: self.non_billable,
            weekend_multiplier: self.weekend_multiplier,
            holiday_multiplier: self.holiday_multiplier,
        }
    }
}

// =============================================================================
// Day Configuration
// =============================================================================

/// Planned duration when a project is not scheduled on real dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DayConfiguration {
    #[serde(default)]
    #[ts(type = "number")]
    pub execution_days: Decimal,
    #[serde(default)]
    #[ts(type = "number")]
    pub buffer_days: Decimal,
    #[serde(default)]
    #[ts(type = "number")]
    pub final_days: Decimal,
}

impl DayConfiguration {
    /// `final_days` when set, else execution plus buffer.
    pub fn total_days(&self) -> Decimal {
        if self.final_days.is_zero() {
            self.execution_days.saturating_add(self.buffer_days)
        } else {
            self.final_days
        }
    }
}

// =============================================================================
// Project
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub client: String,
    pub currency_code: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u8,

    pub tax_enabled: bool,
    /// Stored as nullable; absent means 0.
    #[serde(default)]
    #[ts(type = "number | null")]
    pub tax_percent: Option<Decimal>,
    pub pricing_mode: PricingMode,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub proposed_price: Option<Decimal>,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub target_roi_percent: Option<Decimal>,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub target_margin_percent: Option<Decimal>,
    /// Free-text note on exchange rates used for the quote.
    #[serde(default)]
    pub fx_note: Option<String>,

    #[serde(flatten)]
    pub days: DayConfiguration,
    #[serde(default)]
    pub calendar_mode: bool,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub working_week: WorkingWeek,

    #[serde(default)]
    pub people: Vec<ProjectPerson>,
    #[serde(default)]
    pub holidays: Vec<ProjectHoliday>,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_hours_per_day() -> u8 {
    8
}

impl Project {
    /// Assembles the calculator input from the stored people and settings.
    pub fn calculation_input(&self) -> CalculationInput {
        self.input_from(self.people.iter().map(ProjectPerson::to_row).collect())
    }

    /// Like [`Project::calculation_input`], pricing `RATE_CARD` people
    /// from the given rate card.
    pub fn calculation_input_with(&self, rate_card: &RateCard) -> CalculationInput {
        self.input_from(
            self.people
                .iter()
                .map(|person| person.to_row_with(rate_card))
                .collect(),
        )
    }

    fn input_from(&self, rows: Vec<PersonRow>) -> CalculationInput {
        CalculationInput {
            rows,
            tax_enabled: self.tax_enabled,
            tax_percent: self.tax_percent.unwrap_or(Decimal::ZERO),
            pricing_mode: self.pricing_mode,
            proposed: self.proposed_price,
            target_roi: self.target_roi_percent,
            target_margin: self.target_margin_percent,
        }
    }

    /// Holiday dates that take the day off the schedule.
    pub fn excluded_holidays(&self) -> Vec<NaiveDate> {
        self.holidays
            .iter()
            .filter(|holiday| holiday.treatment == HolidayTreatment::Exclude)
            .map(|holiday| holiday.date)
            .collect()
    }

    /// Working days of the project.
    ///
    /// In calendar mode, business days between the start and end dates
    /// under the project's working week, minus `EXCLUDE` holidays.
    /// Otherwise the whole days of the configured duration.
    pub fn business_days(&self) -> CoreResult<u32> {
        if !self.calendar_mode {
            return Ok(self.days.total_days().floor().to_u32().unwrap_or(0));
        }

        let start = self.start_date.ok_or_else(|| self.missing_date("start"))?;
        let end = self.end_date.ok_or_else(|| self.missing_date("end"))?;

        Ok(calculate_business_days(
            start,
            end,
            self.working_week,
            &self.excluded_holidays(),
        ))
    }

    fn missing_date(&self, missing: &'static str) -> CoreError {
        CoreError::MissingDates {
            project: self.display_name(),
            missing,
        }
    }

    fn display_name(&self) -> String {
        match &self.id {
            Some(id) => format!("{} ({id})", self.name),
            None => self.name.clone(),
        }
    }
}

// =============================================================================
// Project Summary
// =============================================================================

/// Calculated figures stored against a project, keyed by its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: String,
    #[ts(type = "number")]
    pub subtotal: Decimal,
    #[ts(type = "number")]
    pub tax: Decimal,
    #[ts(type = "number")]
    pub cost: Decimal,
    #[ts(type = "number")]
    pub proposed_price: Decimal,
    #[ts(type = "number")]
    pub roi_percent: Decimal,
    #[ts(type = "number")]
    pub margin_percent: Decimal,
    pub currency_code: String,
}

impl ProjectSummary {
    pub fn from_totals(
        project_id: impl Into<String>,
        currency_code: impl Into<String>,
        totals: &CalculationResult,
    ) -> Self {
        ProjectSummary {
            project_id: project_id.into(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            cost: totals.cost,
            proposed_price: totals.proposed,
            roi_percent: totals.roi_percent,
            margin_percent: totals.margin_percent,
            currency_code: currency_code.into(),
        }
    }
}

/// Validates, prices and summarizes a stored project.
///
/// ## Errors
/// - [`CoreError::MissingProjectId`] when the project has no id
/// - [`CoreError::InvalidInput`] when its people or settings break a rule
pub fn summarize_project(project: &Project) -> CoreResult<ProjectSummary> {
    let project_id = project
        .id
        .clone()
        .ok_or_else(|| CoreError::MissingProjectId(project.name.clone()))?;

    let totals = calculate_checked(&project.calculation_input())?;
    debug!(%project_id, proposed = %totals.proposed, "Summarized project");

    Ok(ProjectSummary::from_totals(
        project_id,
        project.currency_code.clone(),
        &totals,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_card::{RateCardRole, RateCardTier};
    use crate::ValidationError;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn person(label: &str, price: Decimal, days: Decimal) -> ProjectPerson {
        ProjectPerson {
            id: None,
            team_member_id: None,
            person_label: label.to_string(),
            role_id: None,
            level: None,
            rate_source: RateSource::Custom,
            price_per_day: price,
            allocated_days: days,
            utilization_percent: dec!(100),
            non_billable: false,
            weekend_multiplier: None,
            holiday_multiplier: None,
            notes: None,
        }
    }

    fn project() -> Project {
        Project {
            id: Some("proj-1".to_string()),
            name: "Website".to_string(),
            client: "Acme".to_string(),
            currency_code: "THB".to_string(),
            currency_symbol: "฿".to_string(),
            hours_per_day: 8,
            tax_enabled: true,
            tax_percent: Some(dec!(7)),
            pricing_mode: PricingMode::Roi,
            proposed_price: None,
            target_roi_percent: Some(dec!(20)),
            target_margin_percent: None,
            fx_note: None,
            days: DayConfiguration {
                execution_days: dec!(20),
                buffer_days: dec!(5),
                final_days: dec!(0),
            },
            calendar_mode: false,
            start_date: None,
            end_date: None,
            working_week: WorkingWeek::MonFri,
            people: vec![person("Lead", dec!(100), dec!(10))],
            holidays: vec![],
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calculation_input_maps_settings() {
        let input = project().calculation_input();
        assert_eq!(input.rows.len(), 1);
        assert!(input.tax_enabled);
        assert_eq!(input.tax_percent, dec!(7));
        assert_eq!(input.pricing_mode, PricingMode::Roi);
        assert_eq!(input.target_roi, Some(dec!(20)));
        assert_eq!(input.proposed, None);
    }

    #[test]
    fn test_missing_tax_percent_is_zero() {
        let project = Project {
            tax_percent: None,
            ..project()
        };
        assert_eq!(project.calculation_input().tax_percent, dec!(0));
    }

    #[test]
    fn test_to_row_keeps_zero_multiplier() {
        let mut p = person("Weekend crew", dec!(100), dec!(2));
        p.weekend_multiplier = Some(dec!(0));
        let row = p.to_row();
        assert_eq!(row.weekend_multiplier, Some(dec!(0)));
        assert_eq!(row.holiday_multiplier, None);
    }

    #[test]
    fn test_summarize_project() {
        let summary = summarize_project(&project()).unwrap();
        assert_eq!(summary.project_id, "proj-1");
        assert_eq!(summary.subtotal, dec!(1000));
        assert_eq!(summary.tax, dec!(70));
        assert_eq!(summary.cost, dec!(1070));
        assert_eq!(summary.proposed_price, dec!(1284));
        assert_eq!(summary.roi_percent, dec!(20));
        assert_eq!(summary.currency_code, "THB");
    }

    #[test]
    fn test_summarize_requires_id() {
        let project = Project {
            id: None,
            ..project()
        };
        assert_eq!(
            summarize_project(&project),
            Err(CoreError::MissingProjectId("Website".to_string()))
        );
    }

    #[test]
    fn test_summarize_rejects_invalid_people() {
        let project = Project {
            people: vec![],
            ..project()
        };
        assert_eq!(
            summarize_project(&project),
            Err(CoreError::InvalidInput(vec![ValidationError::NoRows]))
        );
    }

    #[test]
    fn test_business_days_without_calendar() {
        assert_eq!(project().business_days().unwrap(), 25);

        let fixed = Project {
            days: DayConfiguration {
                execution_days: dec!(20),
                buffer_days: dec!(5),
                final_days: dec!(22.5),
            },
            ..project()
        };
        assert_eq!(fixed.business_days().unwrap(), 22);
    }

    #[test]
    fn test_business_days_in_calendar_mode() {
        let project = Project {
            calendar_mode: true,
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 1, 7)),
            holidays: vec![
                ProjectHoliday {
                    id: None,
                    date: date(2024, 1, 2),
                    name: "Closed".to_string(),
                    treatment: HolidayTreatment::Exclude,
                    holiday_multiplier: None,
                },
                ProjectHoliday {
                    id: None,
                    date: date(2024, 1, 3),
                    name: "Premium day".to_string(),
                    treatment: HolidayTreatment::BillableMultiplier,
                    holiday_multiplier: Some(dec!(2)),
                },
                ProjectHoliday {
                    id: None,
                    date: date(2024, 1, 4),
                    name: "Founders day".to_string(),
                    treatment: HolidayTreatment::Info,
                    holiday_multiplier: None,
                },
            ],
            ..project()
        };
        assert_eq!(project.excluded_holidays(), vec![date(2024, 1, 2)]);
        assert_eq!(project.business_days().unwrap(), 4);
    }

    #[test]
    fn test_calendar_mode_needs_dates() {
        let project = Project {
            calendar_mode: true,
            start_date: Some(date(2024, 1, 1)),
            ..project()
        };
        assert_eq!(
            project.business_days(),
            Err(CoreError::MissingDates {
                project: "Website (proj-1)".to_string(),
                missing: "end",
            })
        );
    }

    #[test]
    fn test_rate_card_pricing() {
        let card = RateCard::new(vec![RateCardRole {
            id: "dev".to_string(),
            name: "Developer".to_string(),
            tiers: vec![RateCardTier {
                id: "dev-sr".to_string(),
                role_id: "dev".to_string(),
                level: RoleLevel::Senior,
                price_per_day: dec!(150),
                active: true,
            }],
        }]);

        let mut from_card = person("Senior dev", dec!(100), dec!(10));
        from_card.rate_source = RateSource::RateCard;
        from_card.role_id = Some("dev".to_string());
        from_card.level = Some(RoleLevel::Senior);
        assert_eq!(from_card.resolve_price(&card), dec!(150));

        let mut custom = from_card.clone();
        custom.rate_source = RateSource::Custom;
        assert_eq!(custom.resolve_price(&card), dec!(100));

        let mut no_tier = from_card.clone();
        no_tier.level = Some(RoleLevel::Junior);
        assert_eq!(no_tier.resolve_price(&card), dec!(100));

        let project = Project {
            people: vec![from_card],
            ..project()
        };
        assert_eq!(project.calculation_input_with(&card).rows[0].price_per_day, dec!(150));
        assert_eq!(project.calculation_input().rows[0].price_per_day, dec!(100));
    }

    #[test]
    fn test_project_from_wire_shape() {
        let project: Project = serde_json::from_value(json!({
            "id": "p-42",
            "name": "Mobile app",
            "client": "Globex",
            "currencyCode": "USD",
            "currencySymbol": "$",
            "taxEnabled": false,
            "pricingMode": "MARGIN",
            "targetMarginPercent": 25,
            "executionDays": 10,
            "bufferDays": 2,
            "finalDays": 0,
            "calendarMode": true,
            "startDate": "2024-01-01",
            "endDate": "2024-01-05",
            "workingWeek": "MON_FRI",
            "people": [
                { "personLabel": "Dev", "rateSource": "CUSTOM", "pricePerDay": 100,
                  "allocatedDays": 10, "utilizationPercent": 100, "nonBillable": false }
            ],
            "holidays": [
                { "date": "2024-01-02", "name": "Bank holiday", "treatment": "EXCLUDE" }
            ]
        }))
        .unwrap();

        assert_eq!(project.hours_per_day, 8);
        assert_eq!(project.days.total_days(), dec!(12));
        assert_eq!(project.business_days().unwrap(), 4);

        let summary = summarize_project(&project).unwrap();
        assert_eq!(summary.proposed_price, dec!(1333.33));
        assert_eq!(summary.margin_percent, dec!(25));
    }
}
