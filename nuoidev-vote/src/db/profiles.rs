//! Profile store queries
//!
//! The vote service only touches the slice of the profile record it owns:
//! lookup, the denormalized `votes`/`rank` pair, and the leaderboard read.
//! Full profile CRUD belongs to the rest of the application.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use nuoidev_common::db::models::Profile;
use nuoidev_common::{Error, Rank, Result};

fn row_to_profile(row: &SqliteRow) -> Result<Profile> {
    let guid: String = row.get("guid");
    let guid = Uuid::parse_str(&guid)
        .map_err(|e| Error::Internal(format!("Failed to parse profile guid: {}", e)))?;

    let user_id: Option<String> = row.get("user_id");
    let user_id = user_id
        .map(|s| Uuid::parse_str(&s))
        .transpose()
        .map_err(|e| Error::Internal(format!("Failed to parse profile user_id: {}", e)))?;

    let rank: String = row.get("rank");
    let rank: Rank = rank.parse()?;

    let created_at: String = row.get("created_at");
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| Error::Internal(format!("Failed to parse created_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    let updated_at: String = row.get("updated_at");
    let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at)
        .map_err(|e| Error::Internal(format!("Failed to parse updated_at: {}", e)))?
        .with_timezone(&chrono::Utc);

    Ok(Profile {
        guid,
        user_id,
        name: row.get("name"),
        nickname: row.get("nickname"),
        avatar: row.get("avatar"),
        bio: row.get("bio"),
        votes: row.get("votes"),
        rank,
        created_at,
        updated_at,
    })
}

const PROFILE_COLUMNS: &str =
    "guid, user_id, name, nickname, avatar, bio, votes, rank, created_at, updated_at";

/// Load a profile by id.
pub async fn get(pool: &SqlitePool, profile_id: Uuid) -> Result<Option<Profile>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM profiles WHERE guid = ?",
        PROFILE_COLUMNS
    ))
    .bind(profile_id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_profile).transpose()
}

/// Insert a new profile record.
pub async fn insert(pool: &SqlitePool, profile: &Profile) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO profiles (guid, user_id, name, nickname, avatar, bio, votes, rank, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(profile.guid.to_string())
    .bind(profile.user_id.map(|id| id.to_string()))
    .bind(&profile.name)
    .bind(&profile.nickname)
    .bind(&profile.avatar)
    .bind(&profile.bio)
    .bind(profile.votes)
    .bind(profile.rank.as_str())
    .bind(profile.created_at.to_rfc3339())
    .bind(profile.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Rewrite the denormalized vote count and rank, leaving every other field
/// untouched. Returns false when the profile no longer exists.
pub async fn set_votes_and_rank(
    pool: &SqlitePool,
    profile_id: Uuid,
    votes: i64,
    rank: Rank,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE profiles SET votes = ?, rank = ?, updated_at = ? WHERE guid = ?",
    )
    .bind(votes)
    .bind(rank.as_str())
    .bind(Utc::now().to_rfc3339())
    .bind(profile_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Top profiles ordered by denormalized vote count, highest first.
pub async fn top_by_votes(pool: &SqlitePool, limit: i64) -> Result<Vec<Profile>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM profiles ORDER BY votes DESC, created_at ASC LIMIT ?",
        PROFILE_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_profile).collect()
}
