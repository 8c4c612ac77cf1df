//! Route definitions for the `/onboarding` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// GET    /          -> get (get-or-create state)
/// PUT    /          -> submit_step
/// DELETE /          -> reset
/// POST   /complete  -> complete (generate curriculum)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(onboarding::get)
                .put(onboarding::submit_step)
                .delete(onboarding::reset),
        )
        .route("/complete", post(onboarding::complete))
}
