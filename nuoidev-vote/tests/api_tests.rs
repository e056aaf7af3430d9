//! Integration tests for the nuoidev-vote API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Vote casting (success, missing identity, unknown profile, duplicate,
//!   quota exhaustion, self-vote)
//! - Remaining-quota query
//! - Leaderboard ordering

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method
use uuid::Uuid;

use nuoidev_common::db::models::Profile;
use nuoidev_common::Rank;
use nuoidev_vote::{build_router, db::profiles, AppState};

/// Test helper: fresh database in a scratch folder plus the app router
async fn setup() -> (axum::Router, SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Should create scratch dir");
    let pool = nuoidev_common::db::init_database(&dir.path().join("nuoidev.db"))
        .await
        .expect("Should initialize test database");

    let quota = nuoidev_vote::db::settings::load_quota_config(&pool)
        .await
        .expect("Should load quota config");

    let state = AppState::new(pool.clone(), quota);
    (build_router(state), pool, dir)
}

/// Test helper: insert a profile owned by an optional user
async fn seed_profile(pool: &SqlitePool, name: &str, user_id: Option<Uuid>, votes: i64) -> Uuid {
    let at = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
    let profile = Profile {
        guid: Uuid::new_v4(),
        user_id,
        name: name.to_string(),
        nickname: None,
        avatar: None,
        bio: None,
        votes,
        rank: Rank::for_votes(votes),
        created_at: at,
        updated_at: at,
    };
    profiles::insert(pool, &profile).await.unwrap();
    profile.guid
}

async fn seed_user(pool: &SqlitePool, username: &str) -> Uuid {
    let guid = Uuid::new_v4();
    sqlx::query("INSERT INTO users (guid, username, display_name, created_at) VALUES (?, ?, ?, ?)")
        .bind(guid.to_string())
        .bind(username)
        .bind(username)
        .bind("2025-05-01T00:00:00+00:00")
        .execute(pool)
        .await
        .unwrap();
    guid
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool, _dir) = setup().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "nuoidev-vote");
    assert!(body["version"].is_string());
}

// =============================================================================
// Vote Casting Tests
// =============================================================================

#[tokio::test]
async fn test_cast_vote_success() {
    let (app, pool, _dir) = setup().await;
    let profile_id = seed_profile(&pool, "Linh", None, 0).await;

    let request = post_json(
        "/api/votes",
        json!({ "profile_id": profile_id, "visitor_id": "visitor_1" }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["remaining_votes"], 9);
    assert_eq!(body["profile"]["votes"], 1);
    assert_eq!(body["profile"]["rank"], "bronze");
    assert_eq!(body["profile"]["guid"], profile_id.to_string());
}

#[tokio::test]
async fn test_cast_vote_missing_identity() {
    let (app, pool, _dir) = setup().await;
    let profile_id = seed_profile(&pool, "Linh", None, 0).await;

    let request = post_json("/api/votes", json!({ "profile_id": profile_id }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("identity"));
}

#[tokio::test]
async fn test_cast_vote_unknown_profile() {
    let (app, _pool, _dir) = setup().await;

    let request = post_json(
        "/api/votes",
        json!({ "profile_id": Uuid::new_v4(), "visitor_id": "visitor_1" }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    // Full quota is still available after a failed attempt
    assert_eq!(body["remaining_votes"], 10);
}

#[tokio::test]
async fn test_cast_vote_duplicate_same_day() {
    let (app, pool, _dir) = setup().await;
    let profile_id = seed_profile(&pool, "Linh", None, 0).await;

    let first = app
        .clone()
        .oneshot(post_json(
            "/api/votes",
            json!({ "profile_id": profile_id, "visitor_id": "visitor_1" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(post_json(
            "/api/votes",
            json!({ "profile_id": profile_id, "visitor_id": "visitor_1" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = extract_json(second.into_body()).await;
    // Remaining quota is unchanged from after the first vote
    assert_eq!(body["remaining_votes"], 9);

    // The denormalized count did not move
    let profile = profiles::get(&pool, profile_id).await.unwrap().unwrap();
    assert_eq!(profile.votes, 1);
}

#[tokio::test]
async fn test_cast_vote_quota_exhaustion() {
    let (app, pool, _dir) = setup().await;

    let mut targets = Vec::new();
    for i in 0..11 {
        targets.push(seed_profile(&pool, &format!("Dev {}", i), None, 0).await);
    }

    for profile_id in targets.iter().take(10) {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/votes",
                json!({ "profile_id": profile_id, "visitor_id": "visitor_1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Eleventh vote the same day is over quota
    let response = app
        .oneshot(post_json(
            "/api/votes",
            json!({ "profile_id": targets[10], "visitor_id": "visitor_1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["remaining_votes"], 0);
}

#[tokio::test]
async fn test_cast_vote_self_vote_forbidden() {
    let (app, pool, _dir) = setup().await;
    let user_id = seed_user(&pool, "minh").await;
    let profile_id = seed_profile(&pool, "Minh", Some(user_id), 0).await;

    let request = post_json(
        "/api/votes",
        json!({ "profile_id": profile_id, "user_id": user_id }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["remaining_votes"], 10);
}

// =============================================================================
// Remaining-Quota Query Tests
// =============================================================================

#[tokio::test]
async fn test_remaining_votes_without_identity() {
    let (app, _pool, _dir) = setup().await;

    let response = app.oneshot(get_request("/api/votes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["remaining_votes"], 10);
    assert_eq!(body["today_votes"], 0);
}

#[tokio::test]
async fn test_remaining_votes_after_voting() {
    let (app, pool, _dir) = setup().await;
    let profile_id = seed_profile(&pool, "Linh", None, 0).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/votes",
            json!({ "profile_id": profile_id, "visitor_id": "visitor_1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/votes?visitor_id=visitor_1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["remaining_votes"], 9);
    assert_eq!(body["today_votes"], 1);
}

#[tokio::test]
async fn test_remaining_votes_tracks_identities_separately() {
    let (app, pool, _dir) = setup().await;
    let profile_id = seed_profile(&pool, "Linh", None, 0).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/votes",
            json!({ "profile_id": profile_id, "visitor_id": "visitor_1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A different visitor still has the full quota
    let response = app
        .oneshot(get_request("/api/votes?visitor_id=visitor_2"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["remaining_votes"], 10);
    assert_eq!(body["today_votes"], 0);
}

// =============================================================================
// Leaderboard Tests
// =============================================================================

#[tokio::test]
async fn test_leaderboard_ordering() {
    let (app, pool, _dir) = setup().await;

    seed_profile(&pool, "Bronze Dev", None, 3).await;
    let top = seed_profile(&pool, "Legend Dev", None, 1200).await;
    seed_profile(&pool, "Gold Dev", None, 60).await;

    let response = app.oneshot(get_request("/api/leaderboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0]["guid"], top.to_string());
    assert_eq!(entries[0]["rank"], "legend");
    assert_eq!(entries[1]["name"], "Gold Dev");
    assert_eq!(entries[2]["name"], "Bronze Dev");

    // Ordering is by vote count, highest first
    let votes: Vec<i64> = entries.iter().map(|e| e["votes"].as_i64().unwrap()).collect();
    assert_eq!(votes, vec![1200, 60, 3]);
}

#[tokio::test]
async fn test_leaderboard_empty() {
    let (app, _pool, _dir) = setup().await;

    let response = app.oneshot(get_request("/api/leaderboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}
