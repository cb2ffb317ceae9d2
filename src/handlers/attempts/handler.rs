//! Attempt handler implementations

use axum::{Json, extract::State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::extract::{ApiJson, ApiPath},
    middleware::AuthenticatedUser,
    services::AttemptService,
    state::AppState,
};

use super::{
    request::MintNftRequest,
    response::{AttemptResponse, MintNftResponse},
};

/// Get an attempt (owner or admin)
pub async fn get_attempt(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<AttemptResponse>> {
    let attempt = AttemptService::get_attempt(state.db(), &auth_user, &id).await?;
    Ok(Json(attempt))
}

/// Attach a mint record to a badge-earning attempt
pub async fn attach_nft(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<MintNftRequest>,
) -> AppResult<Json<MintNftResponse>> {
    payload.validate()?;

    let response =
        AttemptService::attach_nft(state.db(), &auth_user, &id, payload.nft_address.trim()).await?;

    Ok(Json(response))
}
