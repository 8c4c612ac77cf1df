//! Streak tracking: consecutive calendar days with qualifying activity.
//!
//! [`apply_activity`] is a pure reducer over one identity's streak record;
//! the caller persists the result (at most once per calendar day, enforced
//! by a conditional update in the repository layer, not here).

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One identity's streak counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    /// Consecutive days with activity, ending at `last_activity_date`.
    pub current_streak: i32,
    /// Historical maximum of `current_streak`.
    pub longest_streak: i32,
    /// Date of the most recent qualifying activity.
    pub last_activity_date: Option<NaiveDate>,
}

impl StreakRecord {
    /// A record for an identity with no activity yet.
    pub fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
        }
    }
}

/// Advance a streak record for a qualifying activity dated `today`.
///
/// - Activity already counted today: no-op.
/// - Last activity was yesterday: the streak continues.
/// - Gap of two or more days (or no prior activity): reset to 1.
pub fn apply_activity(record: StreakRecord, today: NaiveDate) -> StreakRecord {
    let yesterday = today.pred_opt();

    match record.last_activity_date {
        Some(last) if last == today => record,
        Some(last) if Some(last) == yesterday => {
            let current = record.current_streak + 1;
            StreakRecord {
                current_streak: current,
                longest_streak: record.longest_streak.max(current),
                last_activity_date: Some(today),
            }
        }
        _ => StreakRecord {
            current_streak: 1,
            longest_streak: record.longest_streak.max(1),
            last_activity_date: Some(today),
        },
    }
}

/// Monday-indexed activity bitmap for the ISO week containing `today`.
///
/// `bitmap[0]` is Monday, `bitmap[6]` is Sunday. A slot is set when
/// `activity_dates` contains that day. Derived by set membership; nothing
/// is stored.
pub fn weekly_activity(today: NaiveDate, activity_dates: &[NaiveDate]) -> [bool; 7] {
    let monday = week_start(today);
    let mut bitmap = [false; 7];
    for (offset, slot) in bitmap.iter_mut().enumerate() {
        if let Some(day) = monday.checked_add_days(Days::new(offset as u64)) {
            *slot = activity_dates.contains(&day);
        }
    }
    bitmap
}

/// The Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -- apply_activity --

    #[test]
    fn first_activity_starts_streak() {
        let next = apply_activity(StreakRecord::empty(), date(2025, 3, 10));
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.longest_streak, 1);
        assert_eq!(next.last_activity_date, Some(date(2025, 3, 10)));
    }

    #[test]
    fn same_day_activity_is_noop() {
        let record = StreakRecord {
            current_streak: 3,
            longest_streak: 5,
            last_activity_date: Some(date(2025, 3, 10)),
        };
        assert_eq!(apply_activity(record, date(2025, 3, 10)), record);
    }

    #[test]
    fn consecutive_day_increments() {
        let record = StreakRecord {
            current_streak: 3,
            longest_streak: 3,
            last_activity_date: Some(date(2025, 3, 9)),
        };
        let next = apply_activity(record, date(2025, 3, 10));
        assert_eq!(next.current_streak, 4);
        assert_eq!(next.longest_streak, 4);
    }

    #[test]
    fn longest_is_preserved_when_already_higher() {
        let record = StreakRecord {
            current_streak: 3,
            longest_streak: 10,
            last_activity_date: Some(date(2025, 3, 9)),
        };
        let next = apply_activity(record, date(2025, 3, 10));
        assert_eq!(next.current_streak, 4);
        assert_eq!(next.longest_streak, 10);
    }

    #[test]
    fn gap_of_two_days_resets_to_one() {
        let record = StreakRecord {
            current_streak: 7,
            longest_streak: 7,
            last_activity_date: Some(date(2025, 3, 8)),
        };
        let next = apply_activity(record, date(2025, 3, 10));
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.longest_streak, 7);
        assert_eq!(next.last_activity_date, Some(date(2025, 3, 10)));
    }

    #[test]
    fn increment_across_month_boundary() {
        let record = StreakRecord {
            current_streak: 2,
            longest_streak: 2,
            last_activity_date: Some(date(2025, 2, 28)),
        };
        let next = apply_activity(record, date(2025, 3, 1));
        assert_eq!(next.current_streak, 3);
    }

    // -- weekly_activity --

    #[test]
    fn week_start_is_monday() {
        // 2025-03-12 is a Wednesday.
        assert_eq!(week_start(date(2025, 3, 12)), date(2025, 3, 10));
        // Monday maps to itself.
        assert_eq!(week_start(date(2025, 3, 10)), date(2025, 3, 10));
        // Sunday belongs to the week that started six days earlier.
        assert_eq!(week_start(date(2025, 3, 16)), date(2025, 3, 10));
    }

    #[test]
    fn bitmap_marks_days_within_current_week() {
        let today = date(2025, 3, 12); // Wednesday
        let activity = [
            date(2025, 3, 10), // Monday
            date(2025, 3, 12), // Wednesday
            date(2025, 3, 16), // Sunday
            date(2025, 3, 9),  // previous week, must not appear
        ];
        let bitmap = weekly_activity(today, &activity);
        assert_eq!(bitmap, [true, false, true, false, false, false, true]);
    }

    #[test]
    fn bitmap_empty_without_activity() {
        assert_eq!(weekly_activity(date(2025, 3, 12), &[]), [false; 7]);
    }
}
