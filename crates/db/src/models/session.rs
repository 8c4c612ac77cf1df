//! Anonymous session models.

use mate_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `anon_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnonSession {
    pub token: Uuid,
    pub created_at: Timestamp,
    pub last_seen_at: Timestamp,
}
