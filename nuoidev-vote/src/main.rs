//! nuoidev-vote - Vote & Rank service
//!
//! Records support votes for Nuôi DEV developer profiles, enforces the
//! per-voter daily quota, and serves the leaderboard.

use anyhow::Result;
use tracing::info;

use nuoidev_vote::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Nuôi DEV vote service (nuoidev-vote) v{}", env!("CARGO_PKG_VERSION"));

    // Resolve and prepare the data folder, optional first CLI argument wins
    let cli_data_dir = std::env::args().nth(1);
    let data_dir = nuoidev_common::config::resolve_data_dir(cli_data_dir.as_deref());
    nuoidev_common::config::ensure_data_dir(&data_dir)?;

    let db_path = nuoidev_common::config::database_path(&data_dir);
    info!("Database path: {}", db_path.display());

    let pool = nuoidev_common::db::init_database(&db_path).await?;

    // Deployment parameters live in the settings table
    let quota = nuoidev_vote::db::settings::load_quota_config(&pool).await?;
    info!(
        "Daily vote cap: {} (self-vote check {})",
        quota.daily_cap,
        if quota.reject_self_votes { "on" } else { "off" }
    );

    let port = nuoidev_vote::db::settings::get_i64(&pool, "http_port", 5730).await? as u16;

    let state = AppState::new(pool, quota);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("nuoidev-vote listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
