//! Aggregate stats and XP events.
//!
//! Feeds the achievement evaluator and the level calculator with a
//! per-identity snapshot of counters derived from existing rows.

use mate_core::achievement::StatSnapshot;
use mate_core::identity::Identity;
use sqlx::PgPool;

/// Provides data access for XP events and aggregate stat snapshots.
pub struct StatsRepo;

impl StatsRepo {
    /// Record an XP award.
    pub async fn record_xp(
        pool: &PgPool,
        identity: Identity,
        amount: i32,
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        sqlx::query(
            "INSERT INTO xp_events (user_id, session_token, amount, reason) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(session_token)
        .bind(amount)
        .bind(reason)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Total XP for the identity.
    pub async fn total_xp(pool: &PgPool, identity: Identity) -> Result<i64, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT sum(amount)::bigint FROM xp_events \
             WHERE (user_id = $1 OR session_token = $2)",
        )
        .bind(user_id)
        .bind(session_token)
        .fetch_one(pool)
        .await?;
        Ok(total.unwrap_or(0))
    }

    /// Build the aggregate stat snapshot the achievement evaluator reads.
    ///
    /// - steps: completed content items
    /// - problems: distinct completed curricula (all contents done)
    /// - checklists: completed contents of kind 'checklist'
    /// - streak: current streak row value
    /// - xp: summed XP events
    pub async fn snapshot(pool: &PgPool, identity: Identity) -> Result<StatSnapshot, sqlx::Error> {
        let (user_id, session_token) = identity.columns();

        let row: (i64, i64, i64, i64, i64) = sqlx::query_as(
            "SELECT \
               (SELECT count(*) FROM content_progress \
                 WHERE (user_id = $1 OR session_token = $2)), \
               (SELECT count(*) FROM ( \
                  SELECT c.id FROM curricula c \
                  JOIN curriculum_modules m ON m.curriculum_id = c.id \
                  JOIN contents ct ON ct.module_id = m.id \
                  LEFT JOIN content_progress cp ON cp.content_id = ct.id \
                       AND (cp.user_id = $1 OR cp.session_token = $2) \
                  WHERE (c.user_id = $1 OR c.session_token = $2) \
                  GROUP BY c.id \
                  HAVING count(ct.id) = count(cp.id) \
                ) done), \
               (SELECT count(*) FROM content_progress cp \
                  JOIN contents ct ON ct.id = cp.content_id \
                 WHERE (cp.user_id = $1 OR cp.session_token = $2) \
                   AND ct.kind = 'checklist'), \
               (SELECT COALESCE(max(current_streak), 0)::bigint FROM streaks \
                 WHERE (user_id = $1 OR session_token = $2)), \
               (SELECT COALESCE(sum(amount), 0)::bigint FROM xp_events \
                 WHERE (user_id = $1 OR session_token = $2))",
        )
        .bind(user_id)
        .bind(session_token)
        .fetch_one(pool)
        .await?;

        Ok(StatSnapshot {
            steps_completed: row.0,
            problems_completed: row.1,
            checklists_completed: row.2,
            current_streak: row.3,
            total_xp: row.4,
        })
    }
}
