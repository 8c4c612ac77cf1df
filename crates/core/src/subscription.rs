//! Subscription plans and billing period math.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Available subscription plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Monthly,
    Yearly,
}

impl Plan {
    /// Parse a plan string from the database or a request body.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(CoreError::Validation(format!(
                "Invalid plan '{s}'. Must be one of: monthly, yearly"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Expected charge amount in KRW for this plan.
    pub fn amount(&self) -> i64 {
        match self {
            Self::Monthly => 9_900,
            Self::Yearly => 99_000,
        }
    }
}

/// Compute the end of a billing period starting at `start`.
///
/// Calendar-aware: one month or one year forward, clamping to the last day
/// of the target month when the start day does not exist there
/// (Jan 31 + 1 month = Feb 28/29). Time of day is preserved.
pub fn period_end(start: Timestamp, plan: Plan) -> Timestamp {
    let date = start.date_naive();
    let end_date = match plan {
        Plan::Monthly => add_months(date, 1),
        Plan::Yearly => add_months(date, 12),
    };
    let delta = end_date.signed_duration_since(date);
    start + delta
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.month0() + months;
    let year = date.year() + (zero_based / 12) as i32;
    let month = zero_based % 12 + 1;
    // Clamp the day to the target month's length.
    let mut day = date.day();
    loop {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
            return d;
        }
        day -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 30, 0).unwrap()
    }

    #[test]
    fn plan_round_trips_through_db_strings() {
        for plan in [Plan::Monthly, Plan::Yearly] {
            assert_eq!(Plan::from_str_db(plan.as_str()).unwrap(), plan);
        }
        assert!(Plan::from_str_db("weekly").is_err());
    }

    #[test]
    fn monthly_adds_one_calendar_month() {
        assert_eq!(period_end(at(2025, 3, 15), Plan::Monthly), at(2025, 4, 15));
    }

    #[test]
    fn monthly_clamps_to_end_of_february() {
        assert_eq!(period_end(at(2025, 1, 31), Plan::Monthly), at(2025, 2, 28));
        // Leap year.
        assert_eq!(period_end(at(2024, 1, 31), Plan::Monthly), at(2024, 2, 29));
    }

    #[test]
    fn monthly_wraps_the_year() {
        assert_eq!(period_end(at(2025, 12, 10), Plan::Monthly), at(2026, 1, 10));
    }

    #[test]
    fn yearly_adds_one_year() {
        assert_eq!(period_end(at(2025, 6, 1), Plan::Yearly), at(2026, 6, 1));
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(period_end(at(2024, 2, 29), Plan::Yearly), at(2025, 2, 28));
    }

    #[test]
    fn time_of_day_is_preserved() {
        let end = period_end(at(2025, 3, 15), Plan::Monthly);
        assert_eq!(end.time(), at(2025, 3, 15).time());
    }
}
