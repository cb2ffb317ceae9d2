//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod attempt_repo;
pub mod leaderboard_repo;
pub mod progression_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use attempt_repo::AttemptRepository;
pub use leaderboard_repo::LeaderboardRepository;
pub use progression_repo::ProgressionRepository;
pub use ticket_repo::TicketRepository;
pub use user_repo::UserRepository;
