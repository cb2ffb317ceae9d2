//! Streak handlers

use axum::{Json, Router, extract::State, routing::get};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::extract::ApiPath,
    services::{StreakService, streak_service::StreakStatus},
    state::AppState,
};

/// Streak status of a user
async fn get_streak(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> AppResult<Json<StreakStatus>> {
    let status = StreakService::get_status(state.db(), &user_id).await?;
    Ok(Json(status))
}

/// Streak routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/{user_id}", get(get_streak))
}
