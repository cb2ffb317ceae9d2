//! User handler implementations

use axum::{Json, extract::State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::{
        attempts::{request::ListAttemptsQuery, response::AttemptsListResponse},
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    middleware::AuthenticatedUser,
    services::{AttemptService, UserService},
    state::AppState,
};

use super::{request::UpdateWalletRequest, response::UserProfileResponse};

/// Get a user's profile and progression
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<UserProfileResponse>> {
    let profile = UserService::get_profile(state.db(), &id).await?;
    Ok(Json(profile))
}

/// A user's attempt history (owner or admin)
pub async fn list_user_attempts(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListAttemptsQuery>,
) -> AppResult<Json<AttemptsListResponse>> {
    let (attempts, total, page, per_page) =
        AttemptService::list_for_user(state.db(), &auth_user, &id, &query).await?;

    Ok(Json(AttemptsListResponse {
        attempts,
        total,
        page,
        per_page,
    }))
}

/// Set or clear the caller's wallet address
pub async fn update_wallet(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateWalletRequest>,
) -> AppResult<Json<UserProfileResponse>> {
    payload.validate()?;

    let profile = UserService::update_wallet(state.db(), &auth_user, &id, payload).await?;

    Ok(Json(profile))
}
