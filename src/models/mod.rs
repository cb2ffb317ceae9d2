//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod attempt;
pub mod leaderboard;
pub mod reward;
pub mod stats;
pub mod streak;
pub mod test_case;
pub mod ticket;
pub mod user;

pub use attempt::*;
pub use leaderboard::*;
pub use reward::*;
pub use stats::*;
pub use streak::*;
pub use test_case::*;
pub use ticket::*;
pub use user::*;
