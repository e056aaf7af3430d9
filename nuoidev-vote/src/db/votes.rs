//! Vote ledger queries
//!
//! The ledger is append-only: records are inserted when a vote is accepted
//! and never updated or deleted. The UNIQUE (voter_key, profile_id,
//! vote_day) index enforces the one-vote-per-profile-per-day rule at the
//! storage layer, so the window between the existence check and the insert
//! cannot admit a duplicate.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use nuoidev_common::db::models::Vote;
use nuoidev_common::{time, Result};

/// Outcome of an append attempt against the unique day index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Inserted,
    /// A record for the same (voter, profile, day) already exists.
    DuplicateDay,
}

/// Append one immutable vote record.
///
/// Uniqueness is not re-checked here: the insert itself is the conditional
/// operation, and a violation of the day index is reported as
/// [`AppendOutcome::DuplicateDay`] rather than an error.
pub async fn append(pool: &SqlitePool, vote: &Vote) -> Result<AppendOutcome> {
    let result = sqlx::query(
        r#"
        INSERT INTO votes (guid, profile_id, voter_key, vote_day, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(vote.guid.to_string())
    .bind(vote.profile_id.to_string())
    .bind(&vote.voter_key)
    .bind(&vote.vote_day)
    .bind(vote.created_at.to_rfc3339())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(AppendOutcome::Inserted),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Ok(AppendOutcome::DuplicateDay)
        }
        Err(err) => Err(err.into()),
    }
}

/// Total votes ever cast for a profile, read fresh from the table.
pub async fn count_for_profile(pool: &SqlitePool, profile_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE profile_id = ?")
        .bind(profile_id.to_string())
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Votes this voter has cast across all profiles on the UTC day of `now`.
pub async fn count_for_voter_today(
    pool: &SqlitePool,
    voter_key: &str,
    now: DateTime<Utc>,
) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE voter_key = ? AND vote_day = ?")
            .bind(voter_key)
            .bind(time::day_key(now))
            .fetch_one(pool)
            .await?;

    Ok(count)
}

/// True when this voter already supported this profile on the UTC day of `now`.
pub async fn exists_for_voter_profile_today(
    pool: &SqlitePool,
    voter_key: &str,
    profile_id: Uuid,
    now: DateTime<Utc>,
) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM votes WHERE voter_key = ? AND profile_id = ? AND vote_day = ?)",
    )
    .bind(voter_key)
    .bind(profile_id.to_string())
    .bind(time::day_key(now))
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
