//! Repository for the `earned_badges` join table.
//!
//! The badge catalog itself is a code constant; the `badges` table exists
//! to seed it and anchor the foreign key. Only unlock history is read back.

use mate_core::identity::Identity;
use mate_core::types::DbId;
use sqlx::PgPool;

/// Provides data access for badge unlock history.
pub struct BadgeRepo;

impl BadgeRepo {
    /// Ids of badges the identity has already earned.
    pub async fn earned_ids(pool: &PgPool, identity: Identity) -> Result<Vec<DbId>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        sqlx::query_scalar(
            "SELECT badge_id FROM earned_badges \
             WHERE (user_id = $1 OR session_token = $2) \
             ORDER BY badge_id",
        )
        .bind(user_id)
        .bind(session_token)
        .fetch_all(pool)
        .await
    }

    /// Record the moment of unlock for a set of badges. Conflicts (already
    /// recorded) are ignored.
    pub async fn record_earned(
        pool: &PgPool,
        identity: Identity,
        badge_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        for badge_id in badge_ids {
            sqlx::query(
                "INSERT INTO earned_badges (user_id, session_token, badge_id) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(session_token)
            .bind(badge_id)
            .execute(pool)
            .await?;
        }
        Ok(())
    }
}
