//! Reward outcome of one attempt

use serde::Serialize;

/// What an attempt changed in the user's progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSummary {
    pub xp_awarded: i64,
    pub points_awarded: i64,
    /// First badge of this user on this ticket
    pub first_completion: bool,
    /// First badge of the UTC day; the streak moved
    pub streak_extended: bool,
    pub current_streak: i32,
    pub longest_streak: i32,
}
