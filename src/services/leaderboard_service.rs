//! Leaderboard service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT},
    db::repositories::LeaderboardRepository,
    error::{AppError, AppResult},
    handlers::leaderboard::{request::LeaderboardQuery, response::LeaderboardResponse},
    models::{LeaderboardCategory, UserRanks},
};

/// Leaderboard service for business logic
pub struct LeaderboardService;

impl LeaderboardService {
    /// Ranked users in one category plus aggregate stats
    pub async fn get_leaderboard(pool: &PgPool, query: &LeaderboardQuery) -> AppResult<LeaderboardResponse> {
        let category = match query.category.as_deref() {
            Some(category) => LeaderboardCategory::parse(category)?,
            None => LeaderboardCategory::default(),
        };
        let limit = clamp_limit(query.limit);

        let entries = LeaderboardRepository::top(pool, category, limit).await?;
        let stats = LeaderboardRepository::stats(pool).await?;

        Ok(LeaderboardResponse {
            category,
            entries,
            stats,
        })
    }

    /// A user's rank in every category
    pub async fn get_user_ranks(pool: &PgPool, user_id: &Uuid) -> AppResult<UserRanks> {
        LeaderboardRepository::ranks_for_user(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(10)), 10);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), 500);
    }
}
