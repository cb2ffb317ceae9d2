//! Leaderboard request DTOs

use serde::Deserialize;

/// Leaderboard query parameters
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// `xp` (default), `points`, `streak` or `completed`
    pub category: Option<String>,
    pub limit: Option<i64>,
}
