//! Request identity: authenticated account or anonymous session.
//!
//! Nearly every table in MATE is scoped to one of the two. Handlers and
//! repositories take an [`Identity`] and dispatch on the variant exactly
//! once, instead of re-checking "user or session?" at every call site.

use serde::Serialize;
use uuid::Uuid;

use crate::types::DbId;

/// The owner of a set of rows: an authenticated account id or an
/// anonymous session token. Exactly one is present per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Account { id: DbId },
    AnonymousSession { token: Uuid },
}

impl Identity {
    /// The account id, if this identity is an authenticated account.
    pub fn account_id(&self) -> Option<DbId> {
        match self {
            Identity::Account { id } => Some(*id),
            Identity::AnonymousSession { .. } => None,
        }
    }

    /// The session token, if this identity is an anonymous session.
    pub fn session_token(&self) -> Option<Uuid> {
        match self {
            Identity::Account { .. } => None,
            Identity::AnonymousSession { token } => Some(*token),
        }
    }

    /// Split into the `(user_id, session_token)` column pair used by every
    /// identity-scoped table. Exactly one side is `Some`.
    pub fn columns(&self) -> (Option<DbId>, Option<Uuid>) {
        (self.account_id(), self.session_token())
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Identity::Account { id } => write!(f, "account:{id}"),
            Identity::AnonymousSession { token } => write!(f, "session:{token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_columns() {
        let id = Identity::Account { id: 42 };
        assert_eq!(id.columns(), (Some(42), None));
        assert_eq!(id.account_id(), Some(42));
        assert_eq!(id.session_token(), None);
    }

    #[test]
    fn session_columns() {
        let token = Uuid::new_v4();
        let id = Identity::AnonymousSession { token };
        assert_eq!(id.columns(), (None, Some(token)));
        assert_eq!(id.account_id(), None);
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(Identity::Account { id: 7 }.to_string(), "account:7");
        let token = Uuid::new_v4();
        assert_eq!(
            Identity::AnonymousSession { token }.to_string(),
            format!("session:{token}")
        );
    }
}
