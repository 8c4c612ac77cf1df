//! Repository for the `weekly_goals` table.

use chrono::NaiveDate;
use mate_core::goal::DEFAULT_WEEKLY_TARGET;
use mate_core::identity::Identity;
use sqlx::PgPool;

use crate::models::goal::WeeklyGoalRow;

const COLUMNS: &str = "\
    id, user_id, session_token, week_start, target_count, \
    completed_count, achieved";

/// Provides data access for per-ISO-week goals.
pub struct GoalRepo;

impl GoalRepo {
    /// Get the goal for the week starting at `week_start`, creating it
    /// lazily with the default target on first read.
    pub async fn get_or_create(
        pool: &PgPool,
        identity: Identity,
        week_start: NaiveDate,
    ) -> Result<WeeklyGoalRow, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let conflict_columns = match identity {
            Identity::Account { .. } => "user_id, week_start",
            Identity::AnonymousSession { .. } => "session_token, week_start",
        };
        let guard = match identity {
            Identity::Account { .. } => "user_id IS NOT NULL",
            Identity::AnonymousSession { .. } => "session_token IS NOT NULL",
        };
        let query = format!(
            "INSERT INTO weekly_goals (user_id, session_token, week_start, target_count) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ({conflict_columns}) WHERE {guard} \
             DO UPDATE SET week_start = EXCLUDED.week_start \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklyGoalRow>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(week_start)
            .bind(DEFAULT_WEEKLY_TARGET)
            .fetch_one(pool)
            .await
    }

    /// Update the target for the given week.
    pub async fn set_target(
        pool: &PgPool,
        identity: Identity,
        week_start: NaiveDate,
        target_count: i32,
    ) -> Result<Option<WeeklyGoalRow>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "UPDATE weekly_goals \
             SET target_count = $4, achieved = completed_count >= $4 \
             WHERE (user_id = $1 OR session_token = $2) AND week_start = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklyGoalRow>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(week_start)
            .bind(target_count)
            .fetch_optional(pool)
            .await
    }

    /// Increment the completed count for the given week and refresh the
    /// achieved flag. The row is created first if absent.
    pub async fn increment_completed(
        pool: &PgPool,
        identity: Identity,
        week_start: NaiveDate,
    ) -> Result<WeeklyGoalRow, sqlx::Error> {
        Self::get_or_create(pool, identity, week_start).await?;

        let (user_id, session_token) = identity.columns();
        let query = format!(
            "UPDATE weekly_goals \
             SET completed_count = completed_count + 1, \
                 achieved = completed_count + 1 >= target_count \
             WHERE (user_id = $1 OR session_token = $2) AND week_start = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklyGoalRow>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(week_start)
            .fetch_one(pool)
            .await
    }
}
