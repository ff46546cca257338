//! # Business-Day Calendar
//!
//! Counts working days between two dates under a working-week policy,
//! skipping listed holidays.
//!
//! ## Working Weeks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Policy     Mon  Tue  Wed  Thu  Fri  Sat  Sun                           │
//! │  ─────────  ───  ───  ───  ───  ───  ───  ───                           │
//! │  MON_FRI     ✓    ✓    ✓    ✓    ✓    ✗    ✗                            │
//! │  MON_SAT     ✓    ✓    ✓    ✓    ✓    ✓    ✗                            │
//! │  SUN_THU     ✓    ✓    ✓    ✓    ✗    ✓    ✓                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SUN_THU only takes Friday off; Saturday stays a working day.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Working Week
// =============================================================================

/// Which days of the week are worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkingWeek {
    /// Monday to Friday; Saturday and Sunday off.
    #[default]
    MonFri,
    /// Monday to Saturday; Sunday off.
    MonSat,
    /// Sunday to Thursday, plus Saturday; Friday off.
    SunThu,
}

impl WorkingWeek {
    /// Checks whether the given day of the week is off under this policy.
    pub fn is_weekend(self, day: Weekday) -> bool {
        match self {
            WorkingWeek::MonFri => matches!(day, Weekday::Sat | Weekday::Sun),
            WorkingWeek::MonSat => day == Weekday::Sun,
            WorkingWeek::SunThu => day == Weekday::Fri,
        }
    }

    /// The wire name: `MON_FRI`, `MON_SAT` or `SUN_THU`.
    pub const fn as_str(self) -> &'static str {
        match self {
            WorkingWeek::MonFri => "MON_FRI",
            WorkingWeek::MonSat => "MON_SAT",
            WorkingWeek::SunThu => "SUN_THU",
        }
    }
}

impl fmt::Display for WorkingWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkingWeek {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MON_FRI" => Ok(WorkingWeek::MonFri),
            "MON_SAT" => Ok(WorkingWeek::MonSat),
            "SUN_THU" => Ok(WorkingWeek::SunThu),
            _ => Err(CoreError::UnknownWorkingWeek(s.to_string())),
        }
    }
}

// =============================================================================
// Business Days
// =============================================================================

/// Counts the business days from `start` to `end`, both inclusive.
///
/// A day counts when it is neither a weekend day under `working_week` nor
/// one of `holidays`. `start > end` yields 0.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use estimator_core::{calculate_business_days, WorkingWeek};
///
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
///
/// assert_eq!(calculate_business_days(monday, friday, WorkingWeek::MonFri, &[]), 5);
/// assert_eq!(calculate_business_days(monday, friday, WorkingWeek::MonFri, &[tuesday]), 4);
/// ```
pub fn calculate_business_days(
    start: NaiveDate,
    end: NaiveDate,
    working_week: WorkingWeek,
    holidays: &[NaiveDate],
) -> u32 {
    if start > end {
        return 0;
    }

    let holidays: HashSet<NaiveDate> = holidays.iter().copied().collect();

    let count = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !working_week.is_weekend(day.weekday()) && !holidays.contains(day))
        .count();

    u32::try_from(count).unwrap_or(u32::MAX)
}

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive, non-empty range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "String")]
    start: NaiveDate,
    #[ts(as = "String")]
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidDateRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, both ends included.
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Checks whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Business days in the range. See [`calculate_business_days`].
    pub fn count_business_days_in(&self, working_week: WorkingWeek, holidays: &[NaiveDate]) -> u32 {
        calculate_business_days(self.start, self.end, working_week, holidays)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
