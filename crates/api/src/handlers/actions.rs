//! Handlers for the `/actions` resource (qualifying activity log).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use mate_core::error::CoreError;
use mate_db::models::action::{Action, CreateAction};
use mate_db::repositories::ActionRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::gamification::bump_streak;
use crate::middleware::identity::RequireIdentity;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a recorded action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub action: Action,
    pub current_streak: i32,
    pub longest_streak: i32,
}

/// POST /api/v1/actions
///
/// Record a qualifying action. Any action counts towards the daily streak;
/// only content completions count towards the weekly goal.
pub async fn create(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(input): Json<CreateAction>,
) -> AppResult<(StatusCode, Json<DataResponse<ActionResponse>>)> {
    if input.kind.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Action kind must not be empty".into(),
        )));
    }

    let action = ActionRepo::create(&state.pool, identity, input.kind.trim()).await?;
    let streak = bump_streak(&state, identity, Utc::now().date_naive()).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ActionResponse {
                action,
                current_streak: streak.current_streak,
                longest_streak: streak.longest_streak,
            },
        }),
    ))
}

/// GET /api/v1/actions
pub async fn list(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Action>>>> {
    let actions = ActionRepo::list(&state.pool, identity, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: actions }))
}
