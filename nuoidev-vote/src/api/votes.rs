//! Vote casting and quota query endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use nuoidev_common::db::models::Profile;
use nuoidev_common::{time, Rank, VoterId};

use crate::error::{ApiError, ApiResult};
use crate::voting::{self, VoteOutcome, VoteRejection};
use crate::AppState;

/// Vote casting request.
///
/// Identity is supplied by the session collaborator: the authenticated
/// account id when the caller is logged in, otherwise the per-browser
/// visitor token.
#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    pub profile_id: Uuid,
    pub visitor_id: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Profile subset returned to the voting UI.
#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub guid: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub votes: i64,
    pub rank: Rank,
}

impl From<Profile> for ProfileSummary {
    fn from(profile: Profile) -> Self {
        Self {
            guid: profile.guid,
            name: profile.name,
            nickname: profile.nickname,
            votes: profile.votes,
            rank: profile.rank,
        }
    }
}

/// Successful vote response
#[derive(Debug, Serialize)]
pub struct CastVoteResponse {
    pub message: String,
    pub profile: ProfileSummary,
    pub remaining_votes: i64,
}

fn voter_from_identity(
    user_id: Option<Uuid>,
    visitor_id: Option<String>,
) -> Result<VoterId, ApiError> {
    if let Some(user_id) = user_id {
        return Ok(VoterId::Authenticated(user_id));
    }
    match visitor_id {
        Some(token) if !token.is_empty() => Ok(VoterId::Anonymous(token)),
        _ => Err(ApiError::BadRequest("Missing voter identity".to_string())),
    }
}

fn rejection_response(rejection: VoteRejection) -> Response {
    let (status, message, remaining) = match rejection {
        VoteRejection::ProfileNotFound { remaining_votes } => {
            (StatusCode::NOT_FOUND, "Profile not found", remaining_votes)
        }
        VoteRejection::SelfVote { remaining_votes } => (
            StatusCode::FORBIDDEN,
            "You cannot vote for your own profile",
            remaining_votes,
        ),
        VoteRejection::DailyQuotaExceeded { remaining_votes } => (
            StatusCode::TOO_MANY_REQUESTS,
            "No votes left today, come back tomorrow",
            remaining_votes,
        ),
        VoteRejection::AlreadyVotedToday { remaining_votes } => (
            StatusCode::TOO_MANY_REQUESTS,
            "You already supported this profile today",
            remaining_votes,
        ),
    };

    let body = Json(json!({
        "error": message,
        "remaining_votes": remaining,
    }));

    (status, body).into_response()
}

/// POST /api/votes
///
/// Cast a vote for a profile. Accepted votes return the resynchronized
/// profile subset; every business rejection carries the voter's remaining
/// quota for the day.
pub async fn cast_vote(
    State(state): State<AppState>,
    Json(request): Json<CastVoteRequest>,
) -> ApiResult<Response> {
    let voter = voter_from_identity(request.user_id, request.visitor_id)?;
    let now = time::now();

    match voting::cast_vote(&state.db, state.quota, &voter, request.profile_id, now).await? {
        VoteOutcome::Accepted(accepted) => Ok((
            StatusCode::OK,
            Json(CastVoteResponse {
                message: "Vote recorded".to_string(),
                profile: accepted.profile.into(),
                remaining_votes: accepted.remaining_votes,
            }),
        )
            .into_response()),
        VoteOutcome::Rejected(rejection) => Ok(rejection_response(rejection)),
    }
}

/// Quota query parameters
#[derive(Debug, Deserialize)]
pub struct RemainingVotesQuery {
    pub visitor_id: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Quota query response
#[derive(Debug, Serialize)]
pub struct RemainingVotesResponse {
    pub remaining_votes: i64,
    pub today_votes: i64,
}

/// GET /api/votes
///
/// Read-only remaining-quota query used by the UI before attempting a vote.
/// A caller with no identity yet (first visit) is reported at the full cap.
pub async fn remaining_votes(
    State(state): State<AppState>,
    Query(query): Query<RemainingVotesQuery>,
) -> ApiResult<Json<RemainingVotesResponse>> {
    let Ok(voter) = voter_from_identity(query.user_id, query.visitor_id) else {
        return Ok(Json(RemainingVotesResponse {
            remaining_votes: state.quota.daily_cap,
            today_votes: 0,
        }));
    };

    let status = voting::quota_status(&state.db, state.quota, &voter.key(), time::now()).await?;

    Ok(Json(RemainingVotesResponse {
        remaining_votes: status.remaining,
        today_votes: status.today,
    }))
}
