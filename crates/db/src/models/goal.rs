//! Weekly goal models.

use chrono::NaiveDate;
use mate_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `weekly_goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeeklyGoalRow {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub week_start: NaiveDate,
    pub target_count: i32,
    pub completed_count: i32,
    pub achieved: bool,
}
