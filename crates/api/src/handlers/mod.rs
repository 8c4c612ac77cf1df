//! HTTP handlers, one module per resource.
//!
//! Handlers stay thin: resolve the caller's identity, validate the payload,
//! call into `mate_core` for domain decisions and `mate_db` for persistence,
//! and wrap the result in the `{ "data": ... }` envelope.

pub mod actions;
pub mod auth;
pub mod chat;
pub mod curricula;
pub mod gamification;
pub mod growth_logs;
pub mod onboarding;
pub mod progress;
pub mod sessions;
pub mod subscription;
