//! Growth log models and DTOs.

use chrono::NaiveDate;
use mate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `growth_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GrowthLog {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub title: String,
    pub body: String,
    pub logged_on: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for creating a growth log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGrowthLog {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Defaults to today when absent.
    pub logged_on: Option<NaiveDate>,
}
