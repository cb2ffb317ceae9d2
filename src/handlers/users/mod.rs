//! User handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(handler::get_user))
        .route("/{id}/attempts", get(handler::list_user_attempts))
        .route("/{id}/wallet", put(handler::update_wallet))
}
