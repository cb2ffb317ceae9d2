//! Leaderboard and statistics queries

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        EFFECTIVE_STREAK_SQL, LeaderboardCategory, LeaderboardEntry, LeaderboardStats, PlatformStats,
        UserRanks,
    },
};

/// Repository for ranking queries
pub struct LeaderboardRepository;

impl LeaderboardRepository {
    /// Top users in a category, tied scores share a rank
    pub async fn top(pool: &PgPool, category: LeaderboardCategory, limit: i64) -> AppResult<Vec<LeaderboardEntry>> {
        let query = format!(
            r#"
            SELECT
                RANK() OVER (ORDER BY score DESC) AS rank,
                user_id, username, display_name, score, xp, total_points,
                current_streak, tickets_completed
            FROM (
                SELECT
                    id AS user_id, username, display_name, xp, total_points,
                    ({streak}) AS current_streak, tickets_completed,
                    ({score})::bigint AS score
                FROM users
            ) scored
            ORDER BY rank, username
            LIMIT $1
            "#,
            streak = EFFECTIVE_STREAK_SQL,
            score = category.score_sql(),
        );

        let entries = sqlx::query_as::<_, LeaderboardEntry>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        Ok(entries)
    }

    /// Aggregates over all users
    pub async fn stats(pool: &PgPool) -> AppResult<LeaderboardStats> {
        let query = format!(
            r#"
            SELECT
                COUNT(*) AS total_users,
                COUNT(*) FILTER (WHERE tickets_completed > 0) AS active_users,
                COALESCE(AVG(xp), 0)::float8 AS average_xp,
                COALESCE(MAX({streak}), 0)::int4 AS highest_streak,
                COALESCE(SUM(tickets_completed), 0)::int8 AS total_completions
            FROM users
            "#,
            streak = EFFECTIVE_STREAK_SQL,
        );

        let stats = sqlx::query_as::<_, LeaderboardStats>(&query)
            .fetch_one(pool)
            .await?;

        Ok(stats)
    }

    /// A user's rank in every category
    pub async fn ranks_for_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<UserRanks>> {
        let query = format!(
            r#"
            WITH ranked AS (
                SELECT
                    id,
                    RANK() OVER (ORDER BY {xp} DESC) AS xp_rank,
                    RANK() OVER (ORDER BY {points} DESC) AS points_rank,
                    RANK() OVER (ORDER BY {streak} DESC) AS streak_rank,
                    RANK() OVER (ORDER BY {completed} DESC) AS completed_rank,
                    COUNT(*) OVER () AS total_users
                FROM users
            )
            SELECT id AS user_id, xp_rank, points_rank, streak_rank, completed_rank, total_users
            FROM ranked
            WHERE id = $1
            "#,
            xp = LeaderboardCategory::Xp.score_sql(),
            points = LeaderboardCategory::Points.score_sql(),
            streak = LeaderboardCategory::Streak.score_sql(),
            completed = LeaderboardCategory::Completed.score_sql(),
        );

        let ranks = sqlx::query_as::<_, UserRanks>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(ranks)
    }

    /// Global platform counts
    pub async fn platform_stats(pool: &PgPool) -> AppResult<PlatformStats> {
        let stats = sqlx::query_as::<_, PlatformStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS total_users,
                (SELECT COUNT(*) FROM tickets) AS total_tickets,
                (SELECT COUNT(*) FROM attempts) AS total_attempts,
                (SELECT COUNT(*) FROM attempts WHERE badge_earned) AS badges_earned,
                (SELECT COALESCE(SUM(passed_count), 0)::int8 FROM attempts) AS passed_cases,
                (SELECT COALESCE(SUM(total_count), 0)::int8 FROM attempts) AS total_cases
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }
}
