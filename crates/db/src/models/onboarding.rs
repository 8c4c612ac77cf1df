//! Onboarding state models and DTOs.

use mate_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `onboarding_states` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnboardingState {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: Option<DbId>,
    #[serde(skip_serializing)]
    pub session_token: Option<Uuid>,
    pub current_step: i16,
    pub status: String,
    /// Accumulated answers; deserialized into
    /// `mate_core::onboarding::OnboardingAnswers` by the handler.
    pub answers: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for submitting a step: the target step plus any answer fields the
/// client filled in on the current step.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitStep {
    pub next_step: i16,
    #[serde(default)]
    pub answers: serde_json::Value,
}
