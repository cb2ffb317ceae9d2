//! Attempt service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::AttemptRepository,
    error::{AppError, AppResult},
    handlers::attempts::{
        request::ListAttemptsQuery,
        response::{AttemptResponse, AttemptSummary, MintNftResponse},
    },
    middleware::AuthenticatedUser,
    models::Attempt,
    utils::page_window,
};

/// Attempt service for business logic
pub struct AttemptService;

impl AttemptService {
    /// Get an attempt visible to `viewer`
    pub async fn get_attempt(
        pool: &PgPool,
        viewer: &AuthenticatedUser,
        id: &Uuid,
    ) -> AppResult<AttemptResponse> {
        Self::find_accessible(pool, viewer, id)
            .await
            .map(AttemptResponse::from)
    }

    /// Attach the mint record of a badge; at most once per attempt
    pub async fn attach_nft(
        pool: &PgPool,
        viewer: &AuthenticatedUser,
        id: &Uuid,
        nft_address: &str,
    ) -> AppResult<MintNftResponse> {
        let attempt = Self::find_accessible(pool, viewer, id).await?;

        if !attempt.badge_earned {
            return Err(AppError::Conflict(
                "Attempt did not earn a badge".to_string(),
            ));
        }

        if attempt.is_minted() {
            return Ok(MintNftResponse {
                attempt: attempt.into(),
                already_minted: true,
            });
        }

        match AttemptRepository::attach_nft(pool, id, nft_address.trim()).await? {
            Some(updated) => {
                tracing::info!(attempt_id = %id, nft_address = %nft_address, "NFT attached to attempt");
                Ok(MintNftResponse {
                    attempt: updated.into(),
                    already_minted: false,
                })
            }
            // Lost the race against a concurrent mint
            None => {
                let current = AttemptRepository::find_by_id(pool, id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Attempt not found".to_string()))?;
                Ok(MintNftResponse {
                    attempt: current.into(),
                    already_minted: true,
                })
            }
        }
    }

    /// A user's attempt history
    pub async fn list_for_user(
        pool: &PgPool,
        viewer: &AuthenticatedUser,
        user_id: &Uuid,
        query: &ListAttemptsQuery,
    ) -> AppResult<(Vec<AttemptSummary>, i64, u32, u32)> {
        if !viewer.can_access(user_id) {
            return Err(AppError::Forbidden(
                "You can only view your own attempts".to_string(),
            ));
        }

        let (page, per_page, offset) = page_window(query.page, query.per_page);

        let (attempts, total) = AttemptRepository::list_by_user(
            pool,
            user_id,
            query.ticket_id.as_ref(),
            offset,
            per_page as i64,
        )
        .await?;

        Ok((
            attempts.into_iter().map(AttemptSummary::from).collect(),
            total,
            page,
            per_page,
        ))
    }

    async fn find_accessible(pool: &PgPool, viewer: &AuthenticatedUser, id: &Uuid) -> AppResult<Attempt> {
        let attempt = AttemptRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Attempt not found".to_string()))?;

        if !viewer.can_access(&attempt.user_id) {
            return Err(AppError::Forbidden(
                "You can only access your own attempts".to_string(),
            ));
        }

        Ok(attempt)
    }
}
