//! Timestamp and day-bucketing utilities
//!
//! Vote quotas count "today" as the UTC calendar day. Every function here is
//! a pure function of the timestamp it is given; callers capture the current
//! time once at the request edge and pass it down, which lets tests simulate
//! day rollover without touching the real clock.

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Calendar-day key (`YYYY-MM-DD`) of a timestamp's UTC date.
///
/// Stored alongside each vote so "today" queries are an equality match
/// rather than a comparison against midnight.
pub fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// True when both timestamps fall on the same UTC calendar day.
pub fn same_utc_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}
