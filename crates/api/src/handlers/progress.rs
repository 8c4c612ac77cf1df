//! Handlers for the `/progress` resource.
//!
//! Completing a content item is the central gamification event: it awards
//! XP, logs a qualifying action, bumps the streak, increments the weekly
//! goal, and may cross badge thresholds. Repeat completions are recorded
//! idempotently and award nothing.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use mate_core::error::CoreError;
use mate_core::streak::week_start;
use mate_core::types::DbId;
use mate_db::models::progress::{ContentProgress, CurriculumProgress};
use mate_db::repositories::{ActionRepo, GoalRepo, ProgressRepo, StatsRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::gamification::{
    build_summary, bump_streak, evaluate_and_record_badges, GamificationSummary,
};
use crate::middleware::identity::RequireIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// XP awarded per first-time content completion.
const XP_CONTENT_COMPLETED: i32 = 50;

/// Response payload for a completion request.
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub progress: ContentProgress,
    /// True when this content had already been completed; nothing was awarded.
    pub already_completed: bool,
    pub summary: GamificationSummary,
}

/// POST /api/v1/progress/contents/{id}/complete
pub async fn complete_content(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompletionResponse>>> {
    if !ProgressRepo::content_owned_by(&state.pool, identity, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "content",
            id,
        }));
    }

    let today = Utc::now().date_naive();
    let (progress, was_new) = ProgressRepo::record_completion(&state.pool, identity, id).await?;

    let new_badges = if was_new {
        StatsRepo::record_xp(&state.pool, identity, XP_CONTENT_COMPLETED, "content_completed")
            .await?;
        ActionRepo::create(&state.pool, identity, "content_completed").await?;
        bump_streak(&state, identity, today).await?;
        GoalRepo::increment_completed(&state.pool, identity, week_start(today)).await?;

        let (_, new) = evaluate_and_record_badges(&state, identity).await?;
        new
    } else {
        Vec::new()
    };

    let summary = build_summary(&state, identity, today, new_badges).await?;
    Ok(Json(DataResponse {
        data: CompletionResponse {
            progress,
            already_completed: !was_new,
            summary,
        },
    }))
}

/// GET /api/v1/progress
///
/// Per-curriculum completion counts.
pub async fn overview(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> AppResult<Json<DataResponse<Vec<CurriculumProgress>>>> {
    let rows = ProgressRepo::overview(&state.pool, identity).await?;
    Ok(Json(DataResponse { data: rows }))
}
