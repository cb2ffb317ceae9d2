//! User service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    handlers::users::{request::UpdateWalletRequest, response::UserProfileResponse},
    middleware::AuthenticatedUser,
    utils::today_utc,
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Get a user's profile
    pub async fn get_profile(pool: &PgPool, id: &Uuid) -> AppResult<UserProfileResponse> {
        let user = UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserProfileResponse::from_user(user, today_utc()))
    }

    /// Set the caller's wallet address
    pub async fn update_wallet(
        pool: &PgPool,
        caller: &AuthenticatedUser,
        id: &Uuid,
        payload: UpdateWalletRequest,
    ) -> AppResult<UserProfileResponse> {
        if caller.id != *id {
            return Err(AppError::Forbidden(
                "You can only change your own wallet".to_string(),
            ));
        }

        UserRepository::upsert(pool, &caller.id, &caller.username).await?;
        let wallet = payload
            .wallet_address
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty());
        let user = UserRepository::update_wallet(pool, id, wallet).await?;

        tracing::info!(user_id = %id, has_wallet = wallet.is_some(), "Wallet updated");

        Ok(UserProfileResponse::from_user(user, today_utc()))
    }
}
