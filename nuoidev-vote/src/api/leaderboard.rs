//! Leaderboard endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use uuid::Uuid;

use nuoidev_common::db::models::Profile;
use nuoidev_common::Rank;

use crate::db::{profiles, settings};
use crate::error::ApiResult;
use crate::AppState;

/// One leaderboard row
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub guid: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub votes: i64,
    pub rank: Rank,
}

impl From<Profile> for LeaderboardEntry {
    fn from(profile: Profile) -> Self {
        Self {
            guid: profile.guid,
            name: profile.name,
            nickname: profile.nickname,
            avatar: profile.avatar,
            votes: profile.votes,
            rank: profile.rank,
        }
    }
}

/// GET /api/leaderboard
///
/// Top profiles ordered by vote count, highest first. The row limit is a
/// deployment parameter.
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<LeaderboardEntry>>> {
    let limit = settings::get_i64(&state.db, "leaderboard_limit", 50).await?;
    let top = profiles::top_by_votes(&state.db, limit).await?;

    Ok(Json(top.into_iter().map(LeaderboardEntry::from).collect()))
}
