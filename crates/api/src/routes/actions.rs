//! Route definitions for the `/actions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::actions;
use crate::state::AppState;

/// Routes mounted at `/actions`.
///
/// ```text
/// GET  /  -> list (paginated)
/// POST /  -> create (records a qualifying action; drives the streak)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(actions::list).post(actions::create))
}
