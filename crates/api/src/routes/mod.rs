pub mod actions;
pub mod auth;
pub mod chat;
pub mod curricula;
pub mod gamification;
pub mod growth_logs;
pub mod health;
pub mod onboarding;
pub mod progress;
pub mod sessions;
pub mod subscription;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                          create an account (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (requires account)
///
/// /sessions                             mint an anonymous session token (POST)
///
/// /onboarding                           get state, submit step (GET, PUT), reset (DELETE)
/// /onboarding/complete                  finish flow, generate curriculum (POST)
///
/// /curricula                            list, regenerate (GET, POST)
/// /curricula/{id}                       get
/// /curricula/{id}/modules               list weekly modules
/// /curricula/modules/{id}/contents      list contents of a module
///
/// /progress                             per-curriculum completion counts (GET)
/// /progress/contents/{id}/complete      record a completion (POST)
///
/// /streak                               current/longest + weekly bitmap (GET)
/// /goals/weekly                         current week goal (GET), set target (PUT)
/// /badges                               evaluated achievement list (GET)
/// /dashboard                            level + streak + goal + badges (GET)
///
/// /chat/sessions                        list, create
/// /chat/sessions/{id}/messages          history (GET), send + SSE reply (POST)
///
/// /growth-logs                          list, create
/// /actions                              list, record (POST also drives streak)
///
/// /subscription                         current status (GET, account only)
/// /subscription/confirm                 confirm payment (POST)
/// /subscription/cancel                  cancel (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/sessions", sessions::router())
        .nest("/onboarding", onboarding::router())
        .nest("/curricula", curricula::router())
        .nest("/progress", progress::router())
        .merge(gamification::router())
        .nest("/chat", chat::router())
        .nest("/growth-logs", growth_logs::router())
        .nest("/actions", actions::router())
        .nest("/subscription", subscription::router())
}
