//! Route definitions for the `/sessions` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// POST /  -> create (mint an anonymous session token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(sessions::create))
}
