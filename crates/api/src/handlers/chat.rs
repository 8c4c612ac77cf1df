//! Handlers for the `/chat` resource (coaching conversations).
//!
//! Sending a message persists the user turn, streams the assistant reply
//! back as SSE chunks, and persists the full reply once the stream ends.
//! A client disconnect cancels the upstream generation request.

use std::convert::Infallible;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use axum::Json;
use mate_core::error::CoreError;
use mate_core::types::DbId;
use mate_db::models::chat::{ChatMessage, ChatSession, CreateChatSession, SendMessage};
use mate_db::repositories::ChatRepo;
use mate_llm::{ChatTurn, CHAT_SYSTEM_PROMPT};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::RequireIdentity;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/chat/sessions
pub async fn create_session(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Json(input): Json<CreateChatSession>,
) -> AppResult<(StatusCode, Json<DataResponse<ChatSession>>)> {
    let session = ChatRepo::create_session(&state.pool, identity, input.title.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/chat/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ChatSession>>>> {
    let sessions =
        ChatRepo::list_sessions(&state.pool, identity, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/chat/sessions/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ChatMessage>>>> {
    ChatRepo::find_session(&state.pool, identity, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "chat session",
            id,
        })?;

    let messages = ChatRepo::list_messages(&state.pool, id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/chat/sessions/{id}/messages
///
/// Persist the user message and stream the assistant reply as SSE `message`
/// events, terminated by a `done` event. The full reply is persisted when
/// the upstream stream completes; a disconnect mid-stream cancels the
/// upstream request and skips persistence.
pub async fn send_message(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
    Path(id): Path<DbId>,
    Json(input): Json<SendMessage>,
) -> AppResult<Sse<KeepAliveStream<ReceiverStream<Result<Event, Infallible>>>>> {
    let content = input.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message content must not be empty".into(),
        )));
    }

    let session = ChatRepo::find_session(&state.pool, identity, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "chat session",
            id,
        })?;

    // History is everything before this message; the new turn goes in as
    // the user prompt.
    let history: Vec<ChatTurn> = ChatRepo::list_messages(&state.pool, session.id)
        .await?
        .into_iter()
        .map(|m| ChatTurn {
            role: m.role,
            content: m.content,
        })
        .collect();

    ChatRepo::append_message(&state.pool, session.id, "user", &content).await?;

    let cancel = CancellationToken::new();
    let mut upstream = state
        .llm
        .stream(CHAT_SYSTEM_PROMPT, &history, &content, cancel.clone())
        .await?;

    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(32);
    let pool = state.pool.clone();
    let session_id = session.id;

    tokio::spawn(async move {
        let mut reply = String::new();

        while let Some(item) = upstream.recv().await {
            match item {
                Ok(chunk) => {
                    reply.push_str(&chunk);
                    if tx.send(Ok(Event::default().data(chunk))).await.is_err() {
                        // Client went away; stop the upstream request.
                        cancel.cancel();
                        return;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, session_id, "Chat stream failed");
                    let _ = tx
                        .send(Ok(Event::default().event("error").data("generation failed")))
                        .await;
                    cancel.cancel();
                    return;
                }
            }
        }

        if let Err(e) = ChatRepo::append_message(&pool, session_id, "assistant", &reply).await {
            tracing::error!(error = %e, session_id, "Failed to persist assistant reply");
        }

        let _ = tx.send(Ok(Event::default().event("done").data(""))).await;
    });

    Ok(Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default()))
}
