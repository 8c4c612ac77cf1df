//! Repository for the `actions` table (qualifying activity log).

use mate_core::identity::Identity;
use mate_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use sqlx::PgPool;

use crate::models::action::Action;

const COLUMNS: &str = "id, user_id, session_token, kind, occurred_on, created_at";

/// Provides data access for the activity log.
pub struct ActionRepo;

impl ActionRepo {
    /// Record an action for today.
    pub async fn create(
        pool: &PgPool,
        identity: Identity,
        kind: &str,
    ) -> Result<Action, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "INSERT INTO actions (user_id, session_token, kind) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(kind)
            .fetch_one(pool)
            .await
    }

    /// List the identity's actions, newest first.
    pub async fn list(
        pool: &PgPool,
        identity: Identity,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Action>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM actions \
             WHERE (user_id = $1 OR session_token = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
