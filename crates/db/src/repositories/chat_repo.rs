//! Repository for the `chat_sessions` and `chat_messages` tables.

use mate_core::identity::Identity;
use mate_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use mate_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{ChatMessage, ChatSession};

const SESSION_COLUMNS: &str = "id, user_id, session_token, title, created_at";

const MESSAGE_COLUMNS: &str = "id, chat_session_id, role, content, created_at";

/// Provides data access for chat sessions and their messages.
pub struct ChatRepo;

impl ChatRepo {
    /// Open a new chat session.
    pub async fn create_session(
        pool: &PgPool,
        identity: Identity,
        title: Option<&str>,
    ) -> Result<ChatSession, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "INSERT INTO chat_sessions (user_id, session_token, title) \
             VALUES ($1, $2, COALESCE($3, 'New conversation')) \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, ChatSession>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// List the identity's chat sessions, newest first.
    pub async fn list_sessions(
        pool: &PgPool,
        identity: Identity,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatSession>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(offset);
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM chat_sessions \
             WHERE (user_id = $1 OR session_token = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ChatSession>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Get one chat session, scoped to the identity.
    pub async fn find_session(
        pool: &PgPool,
        identity: Identity,
        id: DbId,
    ) -> Result<Option<ChatSession>, sqlx::Error> {
        let (user_id, session_token) = identity.columns();
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM chat_sessions \
             WHERE id = $3 AND (user_id = $1 OR session_token = $2)"
        );
        sqlx::query_as::<_, ChatSession>(&query)
            .bind(user_id)
            .bind(session_token)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a session's messages in order.
    pub async fn list_messages(
        pool: &PgPool,
        chat_session_id: DbId,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages \
             WHERE chat_session_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(chat_session_id)
            .fetch_all(pool)
            .await
    }

    /// Append a message to a session.
    pub async fn append_message(
        pool: &PgPool,
        chat_session_id: DbId,
        role: &str,
        content: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (chat_session_id, role, content) \
             VALUES ($1, $2, $3) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(chat_session_id)
            .bind(role)
            .bind(content)
            .fetch_one(pool)
            .await
    }
}
