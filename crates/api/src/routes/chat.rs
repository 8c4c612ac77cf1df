//! Route definitions for the `/chat` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// GET  /sessions                -> list_sessions
/// POST /sessions                -> create_session
/// GET  /sessions/{id}/messages  -> list_messages
/// POST /sessions/{id}/messages  -> send_message (SSE streamed reply)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions",
            get(chat::list_sessions).post(chat::create_session),
        )
        .route(
            "/sessions/{id}/messages",
            get(chat::list_messages).post(chat::send_message),
        )
}
