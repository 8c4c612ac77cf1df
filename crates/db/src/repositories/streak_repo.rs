//! Repository for the `streaks` table.
//!
//! The streak transition itself is computed by the pure reducer in
//! `mate_core::streak`; this repo persists the result with a conditional
//! write so a record is mutated at most once per calendar day even under
//! concurrent requests.

use chrono::NaiveDate;
use mate_core::identity::Identity;
use mate_core::streak::StreakRecord;
use sqlx::PgPool;

use crate::models::streak::StreakRow;

const COLUMNS: &str = "\
    id, user_id, session_token, current_streak, longest_streak, \
    last_activity_date, updated_at";

/// Provides data access for streak records.
pub struct StreakRepo;

impl StreakRepo {
    /// Get the identity's streak record, creating a zeroed row on first
    /// read.
    pub async fn get_or_create(pool: &PgPool, identity: Identity) -> Result<StreakRow, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let conflict_column = match identity {
            Identity::Account { .. } => "user_id",
            Identity::AnonymousSession { .. } => "session_token",
        };
        let query = format!(
            "INSERT INTO streaks (user_id, session_token) \
             VALUES ($1, $2) \
             ON CONFLICT ({conflict_column}) WHERE {conflict_column} IS NOT NULL \
             DO UPDATE SET {conflict_column} = EXCLUDED.{conflict_column} \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StreakRow>(&query)
            .bind(user_id)
            .bind(session_token)
            .fetch_one(pool)
            .await
    }

    /// Persist a reduced streak record for activity dated `today`.
    ///
    /// The `IS DISTINCT FROM` guard makes the write a no-op when another
    /// request already counted today, preserving the at-most-once-per-day
    /// invariant. Returns the row as stored (the winner's values on a
    /// race).
    pub async fn apply(
        pool: &PgPool,
        identity: Identity,
        next: StreakRecord,
        today: NaiveDate,
    ) -> Result<StreakRow, sqlx::Error> {
        // Ensure the row exists before the conditional update.
        let existing = Self::get_or_create(pool, identity).await?;

        let (user_id, session_token) = identity.columns();
        let query = format!(
            "UPDATE streaks \
             SET current_streak = $3, longest_streak = $4, \
                 last_activity_date = $5, updated_at = now() \
             WHERE (user_id = $1 OR session_token = $2) \
               AND last_activity_date IS DISTINCT FROM $5 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, StreakRow>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(next.current_streak)
            .bind(next.longest_streak)
            .bind(today)
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(row) => Ok(row),
            // Lost the race (or same-day no-op): re-read the stored row.
            None => {
                if existing.last_activity_date == Some(today) {
                    Ok(existing)
                } else {
                    Self::get_or_create(pool, identity).await
                }
            }
        }
    }

    /// Distinct activity dates within `[from, to]`, for the weekly bitmap.
    pub async fn activity_dates(
        pool: &PgPool,
        identity: Identity,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        sqlx::query_scalar(
            "SELECT DISTINCT occurred_on FROM actions \
             WHERE (user_id = $1 OR session_token = $2) \
               AND occurred_on BETWEEN $3 AND $4 \
             ORDER BY occurred_on",
        )
        .bind(user_id)
        .bind(session_token)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
