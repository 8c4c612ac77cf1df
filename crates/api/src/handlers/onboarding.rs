//! Handlers for the `/onboarding` resource.
//!
//! Onboarding state is explicit and server-side: a current step, a status,
//! and the accumulated answers as JSON. Step submission merges the new
//! answers over the stored object, validates the transition, and persists.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mate_core::error::CoreError;
use mate_core::onboarding::{
    can_complete, into_profile, validate_step_answers, validate_step_transition,
    OnboardingAnswers, OnboardingStatus,
};
use mate_db::models::onboarding::{OnboardingState, SubmitStep};
use mate_db::repositories::OnboardingRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::curricula::generate_curriculum;
use crate::middleware::identity::RequireIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// XP awarded for finishing the onboarding flow.
const XP_ONBOARDING_COMPLETED: i32 = 100;

/// GET /api/v1/onboarding
///
/// Get-or-create the caller's onboarding state.
pub async fn get(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<Json<DataResponse<OnboardingState>>> {
    let onboarding = OnboardingRepo::get_or_create(&state.pool, identity).await?;
    Ok(Json(DataResponse { data: onboarding }))
}

/// PUT /api/v1/onboarding
///
/// Submit answers and move one step forward or back.
pub async fn submit_step(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(input): Json<SubmitStep>,
) -> AppResult<Json<DataResponse<OnboardingState>>> {
    let current = OnboardingRepo::get_or_create(&state.pool, identity).await?;

    validate_step_transition(current.current_step, input.next_step)?;

    let merged = merge_answers(current.answers, input.answers);
    let answers: OnboardingAnswers = serde_json::from_value(merged.clone())
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Malformed answers: {e}"))))?;

    // Moving forward requires the answers for the step being left behind;
    // going back never does.
    if input.next_step > current.current_step {
        validate_step_answers(current.current_step, &answers)?;
    }

    let updated = OnboardingRepo::set_step(&state.pool, identity, input.next_step, &merged)
        .await?
        .ok_or_else(|| AppError::InternalError("Onboarding state vanished mid-update".into()))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/onboarding
///
/// Reset the flow to step 1 with empty answers.
pub async fn reset(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<Json<DataResponse<OnboardingState>>> {
    // Ensure a row exists so reset is idempotent for fresh callers.
    OnboardingRepo::get_or_create(&state.pool, identity).await?;

    let fresh = OnboardingRepo::reset(&state.pool, identity)
        .await?
        .ok_or_else(|| AppError::InternalError("Onboarding state vanished mid-reset".into()))?;

    Ok(Json(DataResponse { data: fresh }))
}

/// POST /api/v1/onboarding/complete
///
/// Validate the finished flow, generate a curriculum from the profile, and
/// mark onboarding completed. Generation failures leave the state untouched
/// so the client can retry; an already-completed flow is a 409.
pub async fn complete(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<(
    StatusCode,
    Json<DataResponse<mate_db::models::curriculum::Curriculum>>,
)> {
    let onboarding = OnboardingRepo::get_or_create(&state.pool, identity).await?;
    let status = OnboardingStatus::from_str_db(&onboarding.status)?;

    let answers: OnboardingAnswers = serde_json::from_value(onboarding.answers)
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Malformed answers: {e}"))))?;
    // Refuses a repeat completion with 409; POST /curricula regenerates.
    can_complete(status, onboarding.current_step, &answers)?;
    let profile = into_profile(answers)?;

    let curriculum = generate_curriculum(&state, identity, profile).await?;

    OnboardingRepo::set_status(&state.pool, identity, OnboardingStatus::Completed).await?;
    mate_db::repositories::StatsRepo::record_xp(
        &state.pool,
        identity,
        XP_ONBOARDING_COMPLETED,
        "onboarding_completed",
    )
    .await?;

    tracing::info!(%identity, curriculum_id = curriculum.id, "Onboarding completed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: curriculum })))
}

/// Shallow-merge `patch` over `base`. Both are expected to be JSON objects;
/// a non-object patch replaces the base wholesale.
fn merge_answers(base: serde_json::Value, patch: serde_json::Value) -> serde_json::Value {
    match (base, patch) {
        (serde_json::Value::Object(mut base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                base.insert(key, value);
            }
            serde_json::Value::Object(base)
        }
        (_, patch) => patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overlays_new_keys() {
        let base = json!({"user_name": "Ada", "industry": "fintech"});
        let patch = json!({"stage": "pre-seed"});
        let merged = merge_answers(base, patch);
        assert_eq!(merged["user_name"], "Ada");
        assert_eq!(merged["stage"], "pre-seed");
    }

    #[test]
    fn merge_overwrites_existing_keys() {
        let base = json!({"industry": "fintech"});
        let patch = json!({"industry": "healthtech"});
        let merged = merge_answers(base, patch);
        assert_eq!(merged["industry"], "healthtech");
    }

    #[test]
    fn non_object_patch_replaces_base() {
        let merged = merge_answers(json!({"a": 1}), json!(null));
        assert_eq!(merged, json!(null));
    }
}
