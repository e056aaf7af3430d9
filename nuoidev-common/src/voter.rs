//! Voter identity
//!
//! Two deployment variants supply the identity used for quota and
//! duplicate-vote tracking: an anonymous per-browser token generated by the
//! client, or an authenticated account id from the session. Quota logic only
//! ever needs a stable comparable key, so both are carried as one tagged
//! type rather than a loose pair of optional fields.

use uuid::Uuid;

/// The actor identity a vote is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VoterId {
    /// Per-browser generated token (`visitor_…`), no account attached.
    Anonymous(String),
    /// Account id of a logged-in user.
    Authenticated(Uuid),
}

impl VoterId {
    /// Stable ledger key for this identity.
    ///
    /// The `anon:` / `user:` prefixes keep the two namespaces disjoint, so a
    /// visitor token can never collide with a user id.
    pub fn key(&self) -> String {
        match self {
            VoterId::Anonymous(token) => format!("anon:{}", token),
            VoterId::Authenticated(user_id) => format!("user:{}", user_id),
        }
    }

    /// Account id when the voter is logged in.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            VoterId::Anonymous(_) => None,
            VoterId::Authenticated(user_id) => Some(*user_id),
        }
    }
}
