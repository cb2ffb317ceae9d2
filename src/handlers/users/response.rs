//! User response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::User;

/// Public profile with progression
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
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
}

impl UserProfileResponse {
    /// Build the profile; a streak broken before `today` shows as 0
    pub fn from_user(user: User, today: NaiveDate) -> Self {
        Self {
            current_streak: user.streak_state().effective_current(today),
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            xp: user.xp,
            total_points: user.total_points,
            longest_streak: user.longest_streak,
            total_active_days: user.total_active_days,
            last_active_date: user.last_active_date,
            tickets_completed: user.tickets_completed,
            wallet_address: user.wallet_address,
            created_at: user.created_at,
        }
    }
}
