//! Route definitions for the `/growth-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::growth_logs;
use crate::state::AppState;

/// Routes mounted at `/growth-logs`.
///
/// ```text
/// GET  /  -> list (paginated)
/// POST /  -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(growth_logs::list).post(growth_logs::create))
}
