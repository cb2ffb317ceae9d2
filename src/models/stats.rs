//! Platform statistics

use serde::Serialize;
use sqlx::FromRow;

/// Global counts
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_tickets: i64,
    pub total_attempts: i64,
    pub badges_earned: i64,
    pub passed_cases: i64,
    pub total_cases: i64,
}

impl PlatformStats {
    /// Share of executed test cases that passed, 0.0 when nothing ran
    pub fn pass_rate(&self) -> f64 {
        if self.total_cases == 0 {
            0.0
        } else {
            self.passed_cases as f64 / self.total_cases as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_rate() {
        let mut stats = PlatformStats {
            total_users: 1,
            total_tickets: 1,
            total_attempts: 2,
            badges_earned: 1,
            passed_cases: 3,
            total_cases: 4,
        };
        assert!((stats.pass_rate() - 0.75).abs() < f64::EPSILON);

        stats.total_cases = 0;
        stats.passed_cases = 0;
        assert_eq!(stats.pass_rate(), 0.0);
    }
}
