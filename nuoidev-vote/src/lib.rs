//! nuoidev-vote - Vote & Rank service for Nuôi DEV
//!
//! Records support votes for developer profiles, enforces the per-voter
//! daily quota, keeps each profile's denormalized vote count and rank tier
//! in sync with the vote ledger, and serves the leaderboard.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod voting;

use voting::QuotaConfig;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Vote quota deployment parameters, loaded from settings at startup
    pub quota: QuotaConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, quota: QuotaConfig) -> Self {
        Self { db, quota }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/votes", post(api::cast_vote).get(api::remaining_votes))
        .route("/api/leaderboard", get(api::get_leaderboard))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
