//! CodeQuest - Submission Grading Pipeline
//!
//! This library provides the grading and progression backend of the CodeQuest
//! platform, where players solve coding tickets and earn XP, streaks and
//! badges.
//!
//! # Features
//!
//! - Ticket store with hidden test cases and reference/validation code
//! - Sandboxed JavaScript and Python execution (Docker or local process)
//! - Per-case verdicts, summaries and badge awards
//! - XP, points, daily streaks and leaderboards
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Models**: Domain models
//! - **Judge**: Harness generation, sandboxes and grading

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
