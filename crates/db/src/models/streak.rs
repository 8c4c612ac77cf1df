//! Streak row model.

use chrono::NaiveDate;
use mate_core::streak::StreakRecord;
use mate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `streaks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StreakRow {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<NaiveDate>,
    pub updated_at: Timestamp,
}

impl StreakRow {
    /// View as the pure-reducer record.
    pub fn record(&self) -> StreakRecord {
        StreakRecord {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_activity_date: self.last_activity_date,
        }
    }
}
