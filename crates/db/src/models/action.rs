//! Qualifying activity (action) models and DTOs.

use chrono::NaiveDate;
use mate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Action {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub kind: String,
    pub occurred_on: NaiveDate,
    pub created_at: Timestamp,
}

/// DTO for recording an action.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAction {
    pub kind: String,
}
