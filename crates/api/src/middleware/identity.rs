//! Identity extractors for Axum handlers.
//!
//! Every user-facing resource is scoped to an [`Identity`]: either a
//! registered account (JWT Bearer token) or an anonymous session
//! (`X-Session-Token` header). The extractor resolves the caller exactly
//! once; handlers and repositories never branch on the variant themselves.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mate_core::error::CoreError;
use mate_core::identity::Identity;
use mate_core::types::DbId;
use mate_db::repositories::SessionRepo;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying an anonymous session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Caller identity extracted from the request headers.
///
/// Resolution order:
/// 1. `Authorization: Bearer <jwt>` -> [`Identity::Account`].
/// 2. `X-Session-Token: <uuid>` -> [`Identity::AnonymousSession`], after
///    verifying the token exists (which also bumps `last_seen_at`).
/// 3. Neither -> 401.
#[derive(Debug, Clone, Copy)]
pub struct RequireIdentity(pub Identity);

impl FromRequestParts<AppState> for RequireIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_header = auth_header.to_str().map_err(|_| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization header".into(),
                ))
            })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

            let claims = validate_token(token, &state.config.jwt).map_err(|_| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

            return Ok(RequireIdentity(Identity::Account { id: claims.sub }));
        }

        if let Some(raw) = parts.headers.get(SESSION_TOKEN_HEADER) {
            let token: Uuid = raw
                .to_str()
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "X-Session-Token must be a UUID".into(),
                    ))
                })?;

            SessionRepo::touch(&state.pool, token).await?.ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Unknown session token".into()))
            })?;

            return Ok(RequireIdentity(Identity::AnonymousSession { token }));
        }

        Err(AppError::Core(CoreError::Unauthorized(
            "Missing identity: provide a Bearer token or X-Session-Token header".into(),
        )))
    }
}

/// Registered account extracted from a JWT Bearer token.
///
/// Used by account-only resources (subscriptions, logout). Anonymous
/// sessions are rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct RequireAccount(pub DbId);

impl FromRequestParts<AppState> for RequireAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireIdentity(identity) = RequireIdentity::from_request_parts(parts, state).await?;
        match identity {
            Identity::Account { id } => Ok(RequireAccount(id)),
            Identity::AnonymousSession { .. } => Err(AppError::Core(CoreError::Unauthorized(
                "This resource requires a registered account".into(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;

    use super::*;
    use crate::auth::jwt::{generate_access_token, JwtConfig};
    use crate::config::ServerConfig;

    /// State backed by a lazy pool; the bearer-token and header-parse
    /// paths never touch the database.
    fn test_state() -> AppState {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/never-connected")
            .expect("lazy pool");

        AppState {
            pool,
            config: Arc::new(ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                cors_origins: Vec::new(),
                request_timeout_secs: 30,
                jwt: JwtConfig {
                    secret: "test-secret-that-is-long-enough-for-hmac".into(),
                    access_token_expiry_mins: 15,
                    refresh_token_expiry_days: 7,
                },
            }),
            llm: Arc::new(mate_llm::LlmApi::new(mate_llm::LlmConfig {
                api_url: "http://localhost:0".into(),
                api_key: "test".into(),
                model: "test".into(),
            })),
            payments: Arc::new(mate_payments::PaymentApi::new(
                mate_payments::PaymentConfig {
                    api_url: "http://localhost:0".into(),
                    secret_key: "test".into(),
                },
            )),
        }
    }

    fn parts_with_headers(headers: &[(&str, &str)]) -> axum::http::request::Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, ()) = builder.body(()).expect("request").into_parts();
        parts
    }

    #[tokio::test]
    async fn valid_bearer_token_resolves_to_account() {
        let state = test_state();
        let token = generate_access_token(42, &state.config.jwt).expect("token");
        let mut parts =
            parts_with_headers(&[("authorization", &format!("Bearer {token}"))]);

        let RequireIdentity(identity) = RequireIdentity::from_request_parts(&mut parts, &state)
            .await
            .expect("extraction should succeed");
        assert_eq!(identity, Identity::Account { id: 42 });
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_rejected() {
        let state = test_state();
        let mut parts = parts_with_headers(&[("authorization", "Bearer not-a-jwt")]);

        let result = RequireIdentity::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_rejected() {
        let state = test_state();
        let mut parts = parts_with_headers(&[("authorization", "Basic dXNlcjpwYXNz")]);

        let result = RequireIdentity::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_session_token_is_rejected_before_lookup() {
        let state = test_state();
        let mut parts = parts_with_headers(&[(SESSION_TOKEN_HEADER, "not-a-uuid")]);

        let result = RequireIdentity::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_identity_is_rejected() {
        let state = test_state();
        let mut parts = parts_with_headers(&[]);

        let result = RequireIdentity::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn require_account_accepts_bearer_accounts() {
        let state = test_state();
        let token = generate_access_token(7, &state.config.jwt).expect("token");
        let mut parts =
            parts_with_headers(&[("authorization", &format!("Bearer {token}"))]);

        let RequireAccount(user_id) = RequireAccount::from_request_parts(&mut parts, &state)
            .await
            .expect("account extraction should succeed");
        assert_eq!(user_id, 7);
    }
}
