//! Leaderboard handler implementations

use axum::{Json, extract::State};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::extract::{ApiPath, ApiQuery},
    models::UserRanks,
    services::LeaderboardService,
    state::AppState,
};

use super::{request::LeaderboardQuery, response::LeaderboardResponse};

/// Ranked users in one category
pub async fn get_leaderboard(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LeaderboardQuery>,
) -> AppResult<Json<LeaderboardResponse>> {
    let leaderboard = LeaderboardService::get_leaderboard(state.db(), &query).await?;
    Ok(Json(leaderboard))
}

/// A user's rank in every category
pub async fn get_user_ranks(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<UserRanks>> {
    let ranks = LeaderboardService::get_user_ranks(state.db(), &id).await?;
    Ok(Json(ranks))
}
