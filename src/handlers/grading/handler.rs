//! Grading handler implementations

use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::extract::ApiJson,
    middleware::OptionalAuth,
    services::GradingService,
    state::AppState,
};

use super::{request::RunTestsRequest, response::RunTestsResponse};

/// Grade code against a ticket or ad-hoc test cases
pub async fn run_tests(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    ApiJson(payload): ApiJson<RunTestsRequest>,
) -> AppResult<Json<RunTestsResponse>> {
    payload.validate()?;

    let response = GradingService::run_tests(
        state.db(),
        state.grader(),
        state.config(),
        auth_user,
        payload,
    )
    .await?;

    Ok(Json(response))
}
