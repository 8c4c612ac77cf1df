//! Route definitions for the gamification read surface.
//!
//! These are top-level routes (merged, not nested) because each is a
//! standalone resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::gamification;
use crate::state::AppState;

/// Gamification routes merged into `/api/v1`.
///
/// ```text
/// GET /streak        -> streak (current/longest + weekly bitmap)
/// GET /goals/weekly  -> weekly_goal
/// PUT /goals/weekly  -> set_weekly_target
/// GET /badges        -> badges (evaluated achievement list)
/// GET /dashboard     -> dashboard (level + streak + goal + recent badges)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/streak", get(gamification::streak))
        .route(
            "/goals/weekly",
            get(gamification::weekly_goal).put(gamification::set_weekly_target),
        )
        .route("/badges", get(gamification::badges))
        .route("/dashboard", get(gamification::dashboard))
}
