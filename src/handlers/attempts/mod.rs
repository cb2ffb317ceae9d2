//! Attempt handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Attempt routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(handler::get_attempt))
        .route("/{id}/nft", post(handler::attach_nft))
}
