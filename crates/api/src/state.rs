use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mate_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// LLM completion client (curriculum generation, chat coaching).
    pub llm: Arc<mate_llm::LlmApi>,
    /// Payment gateway client (subscription confirmation).
    pub payments: Arc<mate_payments::PaymentApi>,
}
