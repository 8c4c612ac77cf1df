//! Handlers for the `/sessions` resource (anonymous session tokens).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mate_db::models::session::AnonSession;
use mate_db::repositories::SessionRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sessions
///
/// Mint an anonymous session token. The client presents it in the
/// `X-Session-Token` header to use the app without an account.
pub async fn create(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<DataResponse<AnonSession>>)> {
    let session = SessionRepo::create(&state.pool).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}
