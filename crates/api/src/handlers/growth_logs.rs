//! Handlers for the `/growth-logs` resource (founder journal entries).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use mate_core::error::CoreError;
use mate_db::models::growth_log::{CreateGrowthLog, GrowthLog};
use mate_db::repositories::GrowthLogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::RequireIdentity;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/growth-logs
pub async fn create(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(input): Json<CreateGrowthLog>,
) -> AppResult<(StatusCode, Json<DataResponse<GrowthLog>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Growth log title must not be empty".into(),
        )));
    }

    let log = GrowthLogRepo::create(&state.pool, identity, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/v1/growth-logs
pub async fn list(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<GrowthLog>>>> {
    let logs = GrowthLogRepo::list(&state.pool, identity, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: logs }))
}
