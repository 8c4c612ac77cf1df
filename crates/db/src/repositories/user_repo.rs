//! Repository for the `users` and `refresh_tokens` tables.

use mate_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, RefreshToken, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, username, password_hash, created_at, updated_at";

/// Column list for `refresh_tokens` queries.
const TOKEN_COLUMNS: &str = "id, user_id, token_hash, expires_at, revoked_at, created_at";

/// Provides data access for accounts and their refresh tokens.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new account.
    pub async fn create(pool: &PgPool, dto: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, username, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&dto.email)
            .bind(&dto.username)
            .bind(&dto.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find an account by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE lower(email) = lower($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Store a refresh token hash for a user.
    pub async fn store_refresh_token(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<RefreshToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO refresh_tokens (user_id, token_hash, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {TOKEN_COLUMNS}"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an unrevoked, unexpired refresh token by its hash.
    pub async fn find_refresh_token(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, sqlx::Error> {
        let query = format!(
            "SELECT {TOKEN_COLUMNS} FROM refresh_tokens \
             WHERE token_hash = $1 AND revoked_at IS NULL AND expires_at > now()"
        );
        sqlx::query_as::<_, RefreshToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single refresh token by its hash.
    pub async fn revoke_refresh_token(pool: &PgPool, token_hash: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = now() \
             WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(token_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Revoke all of a user's refresh tokens (logout everywhere).
    pub async fn revoke_all_refresh_tokens(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = now() \
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
