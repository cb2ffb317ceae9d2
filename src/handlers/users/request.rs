//! User request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_wallet_address;

/// Set or clear the wallet address
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWalletRequest {
    #[validate(custom(function = "validate_wallet_address"))]
    pub wallet_address: Option<String>,
}
