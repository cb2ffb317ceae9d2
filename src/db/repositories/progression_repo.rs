//! Completion and activity bookkeeping

use chrono::NaiveDate;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error::AppResult;

/// Repository for per-ticket completions and per-day activity
pub struct ProgressionRepository;

impl ProgressionRepository {
    /// Record the first badge of a user on a ticket; `false` if one existed
    pub async fn record_completion<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
        ticket_id: &Uuid,
        attempt_id: &Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO ticket_completions (user_id, ticket_id, attempt_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, ticket_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(ticket_id)
        .bind(attempt_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Count a badge on `day`; `true` only for the first one that day
    pub async fn record_activity<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
        day: NaiveDate,
    ) -> AppResult<bool> {
        // xmax is 0 only for freshly inserted rows
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO user_activity (user_id, day)
            VALUES ($1, $2)
            ON CONFLICT (user_id, day) DO UPDATE
            SET completions = user_activity.completions + 1
            RETURNING (xmax = 0)
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(executor)
        .await?;

        Ok(inserted)
    }
}
