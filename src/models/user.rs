//! User model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::StreakState;

/// User database model; progression columns are written only by rewards
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub xp: i64,
    pub total_points: i64,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_active_days: i32,
    pub last_active_date: Option<NaiveDate>,
    pub tickets_completed: i32,
    pub wallet_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn streak_state(&self) -> StreakState {
        StreakState {
            current: self.current_streak,
            longest: self.longest_streak,
            total_active_days: self.total_active_days,
            last_active_date: self.last_active_date,
        }
    }
}
