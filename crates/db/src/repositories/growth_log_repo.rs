//! Repository for the `growth_logs` table.

use mate_core::identity::Identity;
use mate_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use sqlx::PgPool;

use crate::models::growth_log::{CreateGrowthLog, GrowthLog};

const COLUMNS: &str = "id, user_id, session_token, title, body, logged_on, created_at";

/// Provides data access for growth log entries.
pub struct GrowthLogRepo;

impl GrowthLogRepo {
    /// Insert a growth log entry.
    pub async fn create(
        pool: &PgPool,
        identity: Identity,
        dto: &CreateGrowthLog,
    ) -> Result<GrowthLog, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "INSERT INTO growth_logs (user_id, session_token, title, body, logged_on) \
             VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GrowthLog>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(&dto.title)
            .bind(&dto.body)
            .bind(dto.logged_on)
            .fetch_one(pool)
            .await
    }

    /// List the identity's growth logs, newest first.
    pub async fn list(
        pool: &PgPool,
        identity: Identity,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<GrowthLog>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {COLUMNS} FROM growth_logs \
             WHERE (user_id = $1 OR session_token = $2) \
             ORDER BY logged_on DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, GrowthLog>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
