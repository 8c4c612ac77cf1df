//! Chat session and message models and DTOs.

use mate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `chat_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatSession {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub title: String,
    pub created_at: Timestamp,
}

/// A row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub chat_session_id: DbId,
    /// Either `user` or `assistant` (database CHECK constraint).
    pub role: String,
    pub content: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for opening a chat session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChatSession {
    pub title: Option<String>,
}

/// DTO for sending a message to a chat session.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessage {
    pub content: String,
}
