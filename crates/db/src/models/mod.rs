//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` DTO for request payloads where the resource has one

pub mod action;
pub mod chat;
pub mod curriculum;
pub mod goal;
pub mod growth_log;
pub mod onboarding;
pub mod progress;
pub mod session;
pub mod streak;
pub mod subscription;
pub mod user;
