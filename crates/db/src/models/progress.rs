//! Content progress models.

use mate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `content_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentProgress {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub content_id: DbId,
    pub completed_at: Timestamp,
}

/// Per-curriculum completion counts for the progress overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CurriculumProgress {
    pub curriculum_id: DbId,
    pub title: String,
    pub total_contents: i64,
    pub completed_contents: i64,
}
