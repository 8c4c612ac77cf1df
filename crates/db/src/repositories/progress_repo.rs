//! Repository for the `content_progress` table.

use mate_core::identity::Identity;
use mate_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress::{ContentProgress, CurriculumProgress};

const COLUMNS: &str = "id, user_id, session_token, content_id, completed_at";

/// Provides data access for content completion records.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Record a completion. Idempotent: completing the same content twice
    /// returns the original record (partial unique index + DO NOTHING).
    ///
    /// The boolean in the result is `true` when the completion was new.
    pub async fn record_completion(
        pool: &PgPool,
        identity: Identity,
        content_id: DbId,
    ) -> Result<(ContentProgress, bool), sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let insert = format!(
            "INSERT INTO content_progress (user_id, session_token, content_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, ContentProgress>(&insert)
            .bind(user_id)
            .bind(session_token)
            .bind(content_id)
            .fetch_optional(pool)
            .await?;

        if let Some(row) = inserted {
            return Ok((row, true));
        }

        let select = format!(
            "SELECT {COLUMNS} FROM content_progress \
             WHERE content_id = $3 AND (user_id = $1 OR session_token = $2)"
        );
        let existing = sqlx::query_as::<_, ContentProgress>(&select)
            .bind(user_id)
            .bind(session_token)
            .bind(content_id)
            .fetch_one(pool)
            .await?;
        Ok((existing, false))
    }

    /// Check whether a content item belongs to one of the identity's
    /// curricula.
    pub async fn content_owned_by(
        pool: &PgPool,
        identity: Identity,
        content_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let owned: Option<DbId> = sqlx::query_scalar(
            "SELECT ct.id FROM contents ct \
             JOIN curriculum_modules m ON m.id = ct.module_id \
             JOIN curricula c ON c.id = m.curriculum_id \
             WHERE ct.id = $3 AND (c.user_id = $1 OR c.session_token = $2)",
        )
        .bind(user_id)
        .bind(session_token)
        .bind(content_id)
        .fetch_optional(pool)
        .await?;
        Ok(owned.is_some())
    }

    /// Per-curriculum completion counts for the identity's progress
    /// overview.
    pub async fn overview(
        pool: &PgPool,
        identity: Identity,
    ) -> Result<Vec<CurriculumProgress>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        sqlx::query_as::<_, CurriculumProgress>(
            "SELECT c.id AS curriculum_id, c.title, \
                    count(ct.id) AS total_contents, \
                    count(cp.id) AS completed_contents \
             FROM curricula c \
             JOIN curriculum_modules m ON m.curriculum_id = c.id \
             JOIN contents ct ON ct.module_id = m.id \
             LEFT JOIN content_progress cp ON cp.content_id = ct.id \
                  AND (cp.user_id = $1 OR cp.session_token = $2) \
             WHERE (c.user_id = $1 OR c.session_token = $2) \
             GROUP BY c.id, c.title \
             ORDER BY c.created_at DESC",
        )
        .bind(user_id)
        .bind(session_token)
        .fetch_all(pool)
        .await
    }
}
