//! Streak bookkeeping
//!
//! A streak counts consecutive UTC calendar days with at least one badge.

use chrono::{Duration, NaiveDate};

use crate::constants::STREAK_MILESTONES;

/// Streak columns of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    pub current: i32,
    pub longest: i32,
    pub total_active_days: i32,
    pub last_active_date: Option<NaiveDate>,
}

impl StreakState {
    /// Apply activity on `today`.
    ///
    /// Returns `None` when `today` was already recorded. The streak continues
    /// when the previous active day is yesterday and restarts at 1 otherwise.
    pub fn record_activity(&self, today: NaiveDate) -> Option<StreakState> {
        if self.last_active_date.is_some_and(|last| last >= today) {
            return None;
        }

        let yesterday = today - Duration::days(1);
        let current = match self.last_active_date {
            Some(last) if last == yesterday => self.current + 1,
            _ => 1,
        };

        Some(StreakState {
            current,
            longest: self.longest.max(current),
            total_active_days: self.total_active_days + 1,
            last_active_date: Some(today),
        })
    }

    /// Stored streak, or 0 once a full day has been missed
    pub fn effective_current(&self, today: NaiveDate) -> i32 {
        match self.last_active_date {
            Some(last) if last >= today - Duration::days(1) => self.current,
            _ => 0,
        }
    }

    /// The streak is alive but breaks unless the user is active today
    pub fn needs_warning(&self, today: NaiveDate) -> bool {
        self.effective_current(today) > 0
            && self.last_active_date == Some(today - Duration::days(1))
    }
}

/// Smallest milestone above `current`; `None` past the last one
pub fn next_milestone(current: i32) -> Option<i32> {
    STREAK_MILESTONES.iter().copied().find(|&m| m > current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn state(current: i32, longest: i32, last: Option<NaiveDate>) -> StreakState {
        StreakState {
            current,
            longest,
            total_active_days: current,
            last_active_date: last,
        }
    }

    #[test]
    fn test_first_activity_starts_streak() {
        let next = state(0, 0, None).record_activity(day(10)).unwrap();
        assert_eq!(next.current, 1);
        assert_eq!(next.longest, 1);
        assert_eq!(next.total_active_days, 1);
        assert_eq!(next.last_active_date, Some(day(10)));
    }

    #[test]
    fn test_consecutive_day_extends() {
        let next = state(4, 6, Some(day(9))).record_activity(day(10)).unwrap();
        assert_eq!(next.current, 5);
        assert_eq!(next.longest, 6);
    }

    #[test]
    fn test_gap_restarts() {
        let next = state(9, 9, Some(day(7))).record_activity(day(10)).unwrap();
        assert_eq!(next.current, 1);
        assert_eq!(next.longest, 9);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        assert_eq!(state(3, 3, Some(day(10))).record_activity(day(10)), None);
    }

    #[test]
    fn test_longest_follows_current() {
        let next = state(7, 7, Some(day(9))).record_activity(day(10)).unwrap();
        assert_eq!(next.longest, 8);
    }

    #[test]
    fn test_month_boundary() {
        let last = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let next = state(2, 2, Some(last)).record_activity(day(1)).unwrap();
        assert_eq!(next.current, 3);
    }

    #[test]
    fn test_effective_current_and_warning() {
        let s = state(5, 5, Some(day(9)));
        assert_eq!(s.effective_current(day(10)), 5);
        assert!(s.needs_warning(day(10)));

        let active_today = state(5, 5, Some(day(10)));
        assert_eq!(active_today.effective_current(day(10)), 5);
        assert!(!active_today.needs_warning(day(10)));

        let broken = state(5, 5, Some(day(7)));
        assert_eq!(broken.effective_current(day(10)), 0);
        assert!(!broken.needs_warning(day(10)));
    }

    #[test]
    fn test_next_milestone() {
        assert_eq!(next_milestone(0), Some(3));
        assert_eq!(next_milestone(3), Some(7));
        assert_eq!(next_milestone(29), Some(30));
        assert_eq!(next_milestone(364), Some(365));
        assert_eq!(next_milestone(365), None);
        assert_eq!(next_milestone(400), None);
    }
}
