//! Attempt repository

use sqlx::{PgExecutor, PgPool, types::Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Attempt, NewAttempt},
};

/// Repository for attempt database operations
pub struct AttemptRepository;

impl AttemptRepository {
    /// Insert a new attempt
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        attempt: &NewAttempt<'_>,
    ) -> AppResult<Attempt> {
        let attempt = sqlx::query_as::<_, Attempt>(
            r#"
            INSERT INTO attempts (
                ticket_id, user_id, language, code, code_sha256, results,
                passed_count, total_count, badge_earned
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(attempt.ticket_id)
        .bind(attempt.user_id)
        .bind(attempt.language)
        .bind(attempt.code)
        .bind(attempt.code_sha256)
        .bind(Json(attempt.results))
        .bind(attempt.summary.passed)
        .bind(attempt.summary.total)
        .bind(attempt.badge_earned)
        .fetch_one(executor)
        .await?;

        Ok(attempt)
    }

    /// Find attempt by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Attempt>> {
        let attempt = sqlx::query_as::<_, Attempt>(r#"SELECT * FROM attempts WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(attempt)
    }

    /// Attach a mint record; returns `None` when the attempt already has one
    /// or earned no badge
    pub async fn attach_nft(pool: &PgPool, id: &Uuid, nft_address: &str) -> AppResult<Option<Attempt>> {
        let attempt = sqlx::query_as::<_, Attempt>(
            r#"
            UPDATE attempts
            SET nft_address = $2, nft_minted_at = NOW()
            WHERE id = $1 AND badge_earned AND nft_address IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nft_address)
        .fetch_optional(pool)
        .await?;

        Ok(attempt)
    }

    /// List a user's attempts, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &Uuid,
        ticket_id: Option<&Uuid>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Attempt>, i64)> {
        let attempts = sqlx::query_as::<_, Attempt>(
            r#"
            SELECT * FROM attempts
            WHERE user_id = $1 AND ($2::uuid IS NULL OR ticket_id = $2)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(ticket_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM attempts
            WHERE user_id = $1 AND ($2::uuid IS NULL OR ticket_id = $2)
            "#,
        )
        .bind(user_id)
        .bind(ticket_id)
        .fetch_one(pool)
        .await?;

        Ok((attempts, count))
    }
}
