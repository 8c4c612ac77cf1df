//! Domain logic for the MATE platform.
//!
//! This crate holds the pure computation layer: level lookup, streak
//! transitions, weekly goal evaluation, achievement unlock checks, the
//! onboarding step machine, and subscription period math. Everything here
//! is a stateless function over already-fetched data; persistence and HTTP
//! concerns live in `mate-db` and `mate-api`.

pub mod achievement;
pub mod error;
pub mod goal;
pub mod identity;
pub mod level;
pub mod onboarding;
pub mod pagination;
pub mod streak;
pub mod subscription;
pub mod types;
