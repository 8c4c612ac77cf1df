//! Repository for the `anon_sessions` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::session::AnonSession;

const COLUMNS: &str = "token, created_at, last_seen_at";

/// Provides data access for anonymous sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Mint a new anonymous session with a random token.
    pub async fn create(pool: &PgPool) -> Result<AnonSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO anon_sessions (token) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnonSession>(&query)
            .bind(Uuid::new_v4())
            .fetch_one(pool)
            .await
    }

    /// Look up a session and bump its `last_seen_at`.
    ///
    /// Returns `None` for unknown tokens, which the API maps to 401.
    pub async fn touch(pool: &PgPool, token: Uuid) -> Result<Option<AnonSession>, sqlx::Error> {
        let query = format!(
            "UPDATE anon_sessions SET last_seen_at = now() \
             WHERE token = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnonSession>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }
}
