//! Settings table accessors

use sqlx::SqlitePool;

use nuoidev_common::Result;

use crate::voting::QuotaConfig;

/// Read an integer setting, falling back to the default when the key is
/// missing or unparseable.
pub async fn get_i64(pool: &SqlitePool, key: &str, default: i64) -> Result<i64> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value.and_then(|s| s.parse().ok()).unwrap_or(default))
}

/// Read a boolean setting ("true"/"false" or "1"/"0").
pub async fn get_bool(pool: &SqlitePool, key: &str, default: bool) -> Result<bool> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(match value.as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    })
}

/// Load vote quota deployment parameters.
pub async fn load_quota_config(pool: &SqlitePool) -> Result<QuotaConfig> {
    Ok(QuotaConfig {
        daily_cap: get_i64(pool, "daily_vote_cap", 10).await?,
        reject_self_votes: get_bool(pool, "reject_self_votes", true).await?,
    })
}
