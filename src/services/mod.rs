//! Business logic services

pub mod attempt_service;
pub mod auth_service;
pub mod grading_service;
pub mod leaderboard_service;
pub mod reward_service;
pub mod stats_service;
pub mod streak_service;
pub mod ticket_service;
pub mod user_service;

pub use attempt_service::AttemptService;
pub use auth_service::AuthService;
pub use grading_service::GradingService;
pub use leaderboard_service::LeaderboardService;
pub use reward_service::RewardService;
pub use stats_service::StatsService;
pub use streak_service::StreakService;
pub use ticket_service::TicketService;
pub use user_service::UserService;
