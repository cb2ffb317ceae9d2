//! Leaderboard response DTOs

use serde::Serialize;

use crate::models::{LeaderboardCategory, LeaderboardEntry, LeaderboardStats};

/// Leaderboard response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub category: LeaderboardCategory,
    pub entries: Vec<LeaderboardEntry>,
    pub stats: LeaderboardStats,
}
