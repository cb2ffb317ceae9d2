//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod attempts;
pub mod extract;
pub mod grading;
pub mod health;
pub mod leaderboard;
pub mod stats;
pub mod streaks;
pub mod tickets;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(grading::routes())
        .nest("/tickets", tickets::routes())
        .nest("/attempts", attempts::routes())
        .nest("/users", users::routes())
        .nest("/leaderboard", leaderboard::routes())
        .nest("/streaks", streaks::routes())
        .nest("/stats", stats::routes())
}
