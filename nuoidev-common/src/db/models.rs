//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Rank;

/// Community member account (subset used by the vote subsystem; credential
/// handling lives with the auth collaborator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub guid: Uuid,
    pub username: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// Developer profile, restricted to the fields voting reads and writes.
///
/// `votes` and `rank` are denormalized from the vote ledger: after every
/// accepted vote they are recomputed from the ledger count, never
/// incremented in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub guid: Uuid,
    /// Owning account under the authenticated deployment variant.
    pub user_id: Option<Uuid>,
    pub name: String,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub votes: i64,
    pub rank: Rank,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One recorded act of support from a voter toward a profile.
///
/// Immutable once appended; `vote_day` is the UTC calendar day of
/// `created_at` and backs the per-day uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub guid: Uuid,
    pub profile_id: Uuid,
    pub voter_key: String,
    pub vote_day: String,
    pub created_at: DateTime<Utc>,
}
