//! Request identity extractors.
//!
//! - [`identity::RequireIdentity`] -- Resolves the caller to an [`Identity`]
//!   (registered account or anonymous session).
//! - [`identity::RequireAccount`] -- Requires a registered account.
//!
//! [`Identity`]: mate_core::identity::Identity

pub mod identity;
