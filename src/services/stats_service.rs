//! Platform statistics service

use serde::Serialize;
use sqlx::PgPool;

use crate::{db::repositories::LeaderboardRepository, error::AppResult};

/// Global counts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_tickets: i64,
    pub total_attempts: i64,
    pub badges_earned: i64,
    /// Passed share of all executed test cases, 0.0 to 1.0
    pub pass_rate: f64,
}

/// Stats service for business logic
pub struct StatsService;

impl StatsService {
    pub async fn get_stats(pool: &PgPool) -> AppResult<StatsResponse> {
        let stats = LeaderboardRepository::platform_stats(pool).await?;

        Ok(StatsResponse {
            pass_rate: stats.pass_rate(),
            total_users: stats.total_users,
            total_tickets: stats.total_tickets,
            total_attempts: stats.total_attempts,
            badges_earned: stats.badges_earned,
        })
    }
}
