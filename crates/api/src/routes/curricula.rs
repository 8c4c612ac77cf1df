//! Route definitions for the `/curricula` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::curricula;
use crate::state::AppState;

/// Routes mounted at `/curricula`.
///
/// ```text
/// GET  /                       -> list
/// POST /                       -> regenerate (new curriculum from the completed profile)
/// GET  /{id}                   -> get
/// GET  /{id}/modules           -> list_modules
/// GET  /modules/{id}/contents  -> list_contents
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(curricula::list).post(curricula::regenerate))
        .route("/{id}", get(curricula::get))
        .route("/{id}/modules", get(curricula::list_modules))
        .route("/modules/{id}/contents", get(curricula::list_contents))
}
