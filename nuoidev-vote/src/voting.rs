//! Vote quota enforcement and profile resynchronization
//!
//! The decision path for one vote: resolve the target profile, apply the
//! self-vote rule, check the voter's daily quota, check for a same-day
//! duplicate, then append to the ledger and resynchronize the profile's
//! denormalized fields from the ledger count.
//!
//! All functions take the current time as a parameter; nothing below the
//! HTTP handlers reads the clock, so day rollover is test-controllable.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use nuoidev_common::db::models::{Profile, Vote};
use nuoidev_common::{time, Error, Rank, Result, VoterId};

use crate::db::{profiles, votes};
use crate::db::votes::AppendOutcome;

/// Vote quota deployment parameters.
#[derive(Debug, Clone, Copy)]
pub struct QuotaConfig {
    /// Maximum votes one voter may cast across all profiles per UTC day.
    pub daily_cap: i64,
    /// Reject votes by an authenticated user against their own profile.
    /// Anonymous voters have no owned profile, so the rule never applies
    /// to them.
    pub reject_self_votes: bool,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            daily_cap: 10,
            reject_self_votes: true,
        }
    }
}

/// Voter's quota position on the current day.
#[derive(Debug, Clone, Copy)]
pub struct QuotaStatus {
    /// Votes already cast today.
    pub today: i64,
    /// Votes still available today.
    pub remaining: i64,
}

/// Accepted vote: the resynchronized profile and the voter's remaining quota.
#[derive(Debug, Clone)]
pub struct VoteAccepted {
    pub profile: Profile,
    pub remaining_votes: i64,
}

/// Business rejection of a vote attempt.
///
/// Terminal within the request and user-facing; each carries the voter's
/// remaining quota so the UI can display it without a second query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteRejection {
    /// Target profile does not exist.
    ProfileNotFound { remaining_votes: i64 },
    /// An authenticated user tried to support their own profile.
    SelfVote { remaining_votes: i64 },
    /// The whole daily quota is spent.
    DailyQuotaExceeded { remaining_votes: i64 },
    /// This voter already supported this profile today.
    AlreadyVotedToday { remaining_votes: i64 },
}

/// Outcome of a vote attempt that reached a business decision.
#[derive(Debug, Clone)]
pub enum VoteOutcome {
    Accepted(VoteAccepted),
    Rejected(VoteRejection),
}

/// Read-only quota query, used by the UI before attempting a vote.
pub async fn quota_status(
    pool: &SqlitePool,
    quota: QuotaConfig,
    voter_key: &str,
    now: DateTime<Utc>,
) -> Result<QuotaStatus> {
    let today = votes::count_for_voter_today(pool, voter_key, now).await?;
    Ok(QuotaStatus {
        today,
        remaining: (quota.daily_cap - today).max(0),
    })
}

/// Decide a proposed vote and, when accepted, append it to the ledger and
/// resynchronize the target profile.
pub async fn cast_vote(
    pool: &SqlitePool,
    quota: QuotaConfig,
    voter: &VoterId,
    profile_id: Uuid,
    now: DateTime<Utc>,
) -> Result<VoteOutcome> {
    let voter_key = voter.key();

    // Cheapest, most specific check first: does the target exist?
    let Some(profile) = profiles::get(pool, profile_id).await? else {
        let status = quota_status(pool, quota, &voter_key, now).await?;
        return Ok(VoteOutcome::Rejected(VoteRejection::ProfileNotFound {
            remaining_votes: status.remaining,
        }));
    };

    if quota.reject_self_votes {
        if let (Some(owner), Some(user)) = (profile.user_id, voter.user_id()) {
            if owner == user {
                let status = quota_status(pool, quota, &voter_key, now).await?;
                return Ok(VoteOutcome::Rejected(VoteRejection::SelfVote {
                    remaining_votes: status.remaining,
                }));
            }
        }
    }

    let today = votes::count_for_voter_today(pool, &voter_key, now).await?;
    if today >= quota.daily_cap {
        return Ok(VoteOutcome::Rejected(VoteRejection::DailyQuotaExceeded {
            remaining_votes: 0,
        }));
    }

    let remaining_before = (quota.daily_cap - today).max(0);
    if votes::exists_for_voter_profile_today(pool, &voter_key, profile_id, now).await? {
        return Ok(VoteOutcome::Rejected(VoteRejection::AlreadyVotedToday {
            remaining_votes: remaining_before,
        }));
    }

    let vote = Vote {
        guid: Uuid::new_v4(),
        profile_id,
        voter_key: voter_key.clone(),
        vote_day: time::day_key(now),
        created_at: now,
    };

    // The unique day index is the authority; losing the race between the
    // existence check above and this insert folds into the same rejection.
    if votes::append(pool, &vote).await? == AppendOutcome::DuplicateDay {
        return Ok(VoteOutcome::Rejected(VoteRejection::AlreadyVotedToday {
            remaining_votes: remaining_before,
        }));
    }

    let profile = resync_profile(pool, profile_id).await?;
    let spent = votes::count_for_voter_today(pool, &voter_key, now).await?;
    let remaining_votes = (quota.daily_cap - spent).max(0);

    info!(
        "Vote recorded: voter={} profile={} (now {} votes, rank {})",
        voter_key, profile_id, profile.votes, profile.rank
    );

    Ok(VoteOutcome::Accepted(VoteAccepted {
        profile,
        remaining_votes,
    }))
}

/// Recompute a profile's denormalized vote count and rank from the ledger.
///
/// The count is always re-read from the votes table; the stored value is
/// never incremented in place. Calling this twice with no intervening vote
/// produces identical profile state.
pub async fn resync_profile(pool: &SqlitePool, profile_id: Uuid) -> Result<Profile> {
    let count = votes::count_for_profile(pool, profile_id).await?;
    let rank = Rank::for_votes(count);

    if !profiles::set_votes_and_rank(pool, profile_id, count, rank).await? {
        // Profile was deleted between the vote decision and the resync
        return Err(Error::NotFound(format!("profile {}", profile_id)));
    }

    profiles::get(pool, profile_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("profile {}", profile_id)))
}
