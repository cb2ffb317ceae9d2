//! Ticket repository

use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{TestCase, Ticket},
};

/// Repository for ticket database operations
pub struct TicketRepository;

impl TicketRepository {
    /// Create a new ticket
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        difficulty: &str,
        language: &str,
        test_cases: &[TestCase],
        reference_code: Option<&str>,
        validation_code: Option<&str>,
        entry_point: Option<&str>,
        tags: &[String],
        points: i32,
        time_limit_ms: i32,
        created_by: &Uuid,
    ) -> AppResult<Ticket> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (
                title, description, difficulty, language, test_cases,
                reference_code, validation_code, entry_point, tags, points,
                time_limit_ms, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(language)
        .bind(Json(test_cases))
        .bind(reference_code)
        .bind(validation_code)
        .bind(entry_point)
        .bind(tags)
        .bind(points)
        .bind(time_limit_ms)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(ticket)
    }

    /// Find ticket by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(r#"SELECT * FROM tickets WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(ticket)
    }

    /// Administrative edit; `None` leaves a column unchanged
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        difficulty: Option<&str>,
        test_cases: Option<&[TestCase]>,
        reference_code: Option<&str>,
        validation_code: Option<&str>,
        entry_point: Option<&str>,
        tags: Option<&[String]>,
        points: Option<i32>,
        time_limit_ms: Option<i32>,
    ) -> AppResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                difficulty = COALESCE($4, difficulty),
                test_cases = COALESCE($5, test_cases),
                reference_code = COALESCE($6, reference_code),
                validation_code = COALESCE($7, validation_code),
                entry_point = COALESCE($8, entry_point),
                tags = COALESCE($9, tags),
                points = COALESCE($10, points),
                time_limit_ms = COALESCE($11, time_limit_ms),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(test_cases.map(Json))
        .bind(reference_code)
        .bind(validation_code)
        .bind(entry_point)
        .bind(tags)
        .bind(points)
        .bind(time_limit_ms)
        .fetch_optional(pool)
        .await?;

        Ok(ticket)
    }

    /// List tickets with pagination
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        difficulty: Option<&str>,
        language: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<(Vec<Ticket>, i64)> {
        let tickets = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT * FROM tickets
            WHERE
                ($1::text IS NULL OR difficulty = $1)
                AND ($2::text IS NULL OR language = $2)
                AND ($3::text IS NULL OR $3 = ANY(tags))
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(difficulty)
        .bind(language)
        .bind(tag)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM tickets
            WHERE
                ($1::text IS NULL OR difficulty = $1)
                AND ($2::text IS NULL OR language = $2)
                AND ($3::text IS NULL OR $3 = ANY(tags))
            "#,
        )
        .bind(difficulty)
        .bind(language)
        .bind(tag)
        .fetch_one(pool)
        .await?;

        Ok((tickets, count))
    }
}
