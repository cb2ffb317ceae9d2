//! Streak service

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::AppResult,
    models::{StreakState, next_milestone},
    utils::today_utc,
};

/// Streak status of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStatus {
    pub user_id: Uuid,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_active_days: i32,
    pub last_active_date: Option<NaiveDate>,
    pub active_today: bool,
    /// Next threshold above the current streak; `None` past the last one
    pub next_milestone: Option<i32>,
    pub days_to_next_milestone: Option<i32>,
    /// Streak breaks at the end of today without activity
    pub needs_warning: bool,
}

impl StreakStatus {
    pub fn from_state(user_id: Uuid, state: &StreakState, today: NaiveDate) -> Self {
        let current = state.effective_current(today);
        let next = next_milestone(current);

        Self {
            user_id,
            current_streak: current,
            longest_streak: state.longest,
            total_active_days: state.total_active_days,
            last_active_date: state.last_active_date,
            active_today: state.last_active_date == Some(today),
            next_milestone: next,
            days_to_next_milestone: next.map(|m| m - current),
            needs_warning: state.needs_warning(today),
        }
    }
}

/// Streak service for business logic
pub struct StreakService;

impl StreakService {
    /// Streak status; users without activity report an empty streak
    pub async fn get_status(pool: &PgPool, user_id: &Uuid) -> AppResult<StreakStatus> {
        let state = UserRepository::find_by_id(pool, user_id)
            .await?
            .map(|user| user.streak_state())
            .unwrap_or(StreakState {
                current: 0,
                longest: 0,
                total_active_days: 0,
                last_active_date: None,
            });

        Ok(StreakStatus::from_state(*user_id, &state, today_utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_yesterday_activity() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let state = StreakState {
            current: 6,
            longest: 10,
            total_active_days: 20,
            last_active_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        };

        let status = StreakStatus::from_state(Uuid::nil(), &state, today);
        assert_eq!(status.current_streak, 6);
        assert_eq!(status.next_milestone, Some(7));
        assert_eq!(status.days_to_next_milestone, Some(1));
        assert!(status.needs_warning);
        assert!(!status.active_today);
    }

    #[test]
    fn test_status_after_missed_day() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let state = StreakState {
            current: 6,
            longest: 6,
            total_active_days: 6,
            last_active_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        };

        let status = StreakStatus::from_state(Uuid::nil(), &state, today);
        assert_eq!(status.current_streak, 0);
        assert_eq!(status.longest_streak, 6);
        assert_eq!(status.next_milestone, Some(3));
        assert!(!status.needs_warning);
    }

    #[test]
    fn test_status_past_last_milestone() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let state = StreakState {
            current: 400,
            longest: 400,
            total_active_days: 400,
            last_active_date: Some(today),
        };

        let status = StreakStatus::from_state(Uuid::nil(), &state, today);
        assert_eq!(status.next_milestone, None);
        assert_eq!(status.days_to_next_milestone, None);
        assert!(status.active_today);
    }
}
