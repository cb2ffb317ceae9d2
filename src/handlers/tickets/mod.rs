//! Ticket store handlers

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

/// Ticket routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_tickets).post(handler::create_ticket))
        .route("/{id}", put(handler::update_ticket).get(handler::get_ticket))
}
