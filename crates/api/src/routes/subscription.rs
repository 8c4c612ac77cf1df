//! Route definitions for the `/subscription` resource (account only).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscription;
use crate::state::AppState;

/// Routes mounted at `/subscription`.
///
/// ```text
/// GET  /         -> get (current status)
/// POST /confirm  -> confirm (verify payment, activate)
/// POST /cancel   -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subscription::get))
        .route("/confirm", post(subscription::confirm))
        .route("/cancel", post(subscription::cancel))
}
