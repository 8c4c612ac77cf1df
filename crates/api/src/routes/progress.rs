//! Route definitions for the `/progress` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Routes mounted at `/progress`.
///
/// ```text
/// GET  /                        -> overview (per-curriculum completion counts)
/// POST /contents/{id}/complete  -> complete_content
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(progress::overview))
        .route("/contents/{id}/complete", post(progress::complete_content))
}
