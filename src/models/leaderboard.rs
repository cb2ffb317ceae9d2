//! Leaderboard models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Streak that is still alive today, 0 otherwise
pub const EFFECTIVE_STREAK_SQL: &str =
    "CASE WHEN last_active_date >= (NOW() AT TIME ZONE 'UTC')::date - 1 THEN current_streak ELSE 0 END";

/// Ranking dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardCategory {
    #[default]
    Xp,
    Points,
    Streak,
    Completed,
}

impl LeaderboardCategory {
    pub const ALL: [LeaderboardCategory; 4] = [Self::Xp, Self::Points, Self::Streak, Self::Completed];

    pub fn parse(category: &str) -> AppResult<Self> {
        match category.trim().to_ascii_lowercase().as_str() {
            "xp" => Ok(Self::Xp),
            "points" => Ok(Self::Points),
            "streak" | "streaks" => Ok(Self::Streak),
            "completed" | "tickets" => Ok(Self::Completed),
            other => Err(AppError::Validation(format!(
                "Invalid leaderboard category: {}. Must be one of: xp, points, streak, completed",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xp => "xp",
            Self::Points => "points",
            Self::Streak => "streak",
            Self::Completed => "completed",
        }
    }

    /// SQL expression producing the score; a streak older than yesterday
    /// counts as 0
    pub fn score_sql(&self) -> &'static str {
        match self {
            Self::Xp => "xp",
            Self::Points => "total_points",
            Self::Streak => EFFECTIVE_STREAK_SQL,
            Self::Completed => "tickets_completed",
        }
    }
}

/// One ranked row
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub score: i64,
    pub xp: i64,
    pub total_points: i64,
    pub current_streak: i32,
    pub tickets_completed: i32,
}

/// Aggregates shown next to the leaderboard
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardStats {
    pub total_users: i64,
    pub active_users: i64,
    pub average_xp: f64,
    pub highest_streak: i32,
    pub total_completions: i64,
}

/// A user's rank in every category
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRanks {
    pub user_id: Uuid,
    pub xp_rank: i64,
    pub points_rank: i64,
    pub streak_rank: i64,
    pub completed_rank: i64,
    pub total_users: i64,
}
