//! User repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{StreakState, User},
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create the user on first sight, refreshing the username from the token
    pub async fn upsert<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid, username: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
            SET username = EXCLUDED.username, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(username)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Lock the user row until the surrounding transaction ends
    pub async fn lock_for_update<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1 FOR UPDATE"#)
            .bind(id)
            .fetch_one(executor)
            .await?;

        Ok(user)
    }

    /// Add rewards and write the streak columns
    pub async fn apply_progression<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        xp_delta: i64,
        points_delta: i64,
        completed_delta: i32,
        streak: &StreakState,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                xp = xp + $2,
                total_points = total_points + $3,
                tickets_completed = tickets_completed + $4,
                current_streak = $5,
                longest_streak = $6,
                total_active_days = $7,
                last_active_date = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(xp_delta)
        .bind(points_delta)
        .bind(completed_delta)
        .bind(streak.current)
        .bind(streak.longest)
        .bind(streak.total_active_days)
        .bind(streak.last_active_date)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Set or clear the wallet address
    pub async fn update_wallet(pool: &PgPool, id: &Uuid, wallet_address: Option<&str>) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET wallet_address = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(wallet_address)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
