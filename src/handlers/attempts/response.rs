//! Attempt response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    judge::{CaseView, Summary},
    models::Attempt,
};

/// Attempt detail with redacted case results
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub language: String,
    pub code: String,
    pub code_sha256: String,
    pub results: Vec<CaseView>,
    pub summary: Summary,
    pub badge_earned: bool,
    pub nft_address: Option<String>,
    pub nft_minted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Attempt> for AttemptResponse {
    fn from(attempt: Attempt) -> Self {
        Self {
            results: attempt.client_results(),
            summary: attempt.summary(),
            id: attempt.id,
            ticket_id: attempt.ticket_id,
            user_id: attempt.user_id,
            language: attempt.language,
            code: attempt.code,
            code_sha256: attempt.code_sha256,
            badge_earned: attempt.badge_earned,
            nft_address: attempt.nft_address,
            nft_minted_at: attempt.nft_minted_at,
            created_at: attempt.created_at,
        }
    }
}

/// Result of a mint request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintNftResponse {
    pub attempt: AttemptResponse,
    /// The attempt already carried a mint record; it was left unchanged
    pub already_minted: bool,
}

/// Attempt summary for history views
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub language: String,
    pub summary: Summary,
    pub badge_earned: bool,
    pub nft_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Attempt> for AttemptSummary {
    fn from(attempt: Attempt) -> Self {
        Self {
            summary: attempt.summary(),
            id: attempt.id,
            ticket_id: attempt.ticket_id,
            language: attempt.language,
            badge_earned: attempt.badge_earned,
            nft_address: attempt.nft_address,
            created_at: attempt.created_at,
        }
    }
}

/// Attempt history response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptsListResponse {
    pub attempts: Vec<AttemptSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
