//! HTTP API handlers for nuoidev-vote

pub mod health;
pub mod leaderboard;
pub mod votes;

pub use health::health_routes;
pub use leaderboard::get_leaderboard;
pub use votes::{cast_vote, remaining_votes};
