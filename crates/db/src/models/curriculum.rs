//! Curriculum, module, and content models.

use mate_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `curricula` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Curriculum {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub title: String,
    pub industry: String,
    pub stage: String,
    pub goal: String,
    pub created_at: Timestamp,
}

/// A row from the `curriculum_modules` table (one week of the plan).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CurriculumModule {
    pub id: DbId,
    pub curriculum_id: DbId,
    pub week_number: i32,
    pub theme: String,
}

/// A row from the `contents` table (one item within a week).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub module_id: DbId,
    pub position: i32,
    pub title: String,
    pub summary: String,
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Insert payloads (from the parsed generation reply)
// ---------------------------------------------------------------------------

/// A curriculum ready to persist, produced from the parsed LLM plan.
#[derive(Debug, Clone)]
pub struct NewCurriculum {
    pub title: String,
    pub industry: String,
    pub stage: String,
    pub goal: String,
    pub weeks: Vec<NewModule>,
}

/// One week of a new curriculum.
#[derive(Debug, Clone)]
pub struct NewModule {
    pub week_number: i32,
    pub theme: String,
    pub items: Vec<NewContent>,
}

/// One content item of a new module.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: String,
    pub summary: String,
    pub kind: String,
}
