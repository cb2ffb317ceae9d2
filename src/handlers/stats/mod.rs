//! Platform statistics handlers

use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    services::{StatsService, stats_service::StatsResponse},
    state::AppState,
};

/// Global counts
async fn get_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = StatsService::get_stats(state.db()).await?;
    Ok(Json(stats))
}

/// Stats routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}
