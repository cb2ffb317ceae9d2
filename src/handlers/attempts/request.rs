//! Attempt request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Attach a mint record to an attempt
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MintNftRequest {
    #[validate(length(min = 1, max = 128))]
    pub nft_address: String,
}

/// Attempt history query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttemptsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub ticket_id: Option<Uuid>,
}
