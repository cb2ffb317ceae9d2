//! Attempt model

use chrono::{DateTime, Utc};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use crate::judge::{CaseResult, CaseView, Summary};

/// One graded submission, immutable except for the NFT mint record
#[derive(Debug, Clone, FromRow)]
pub struct Attempt {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub language: String,
    pub code: String,
    pub code_sha256: String,
    pub results: Json<Vec<CaseResult>>,
    pub passed_count: i32,
    pub total_count: i32,
    pub badge_earned: bool,
    pub nft_address: Option<String>,
    pub nft_minted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Attempt {
    pub fn summary(&self) -> Summary {
        Summary {
            passed: self.passed_count,
            total: self.total_count,
        }
    }

    /// Redacted per-case results
    pub fn client_results(&self) -> Vec<CaseView> {
        self.results.iter().map(CaseResult::client_view).collect()
    }

    pub fn is_minted(&self) -> bool {
        self.nft_address.is_some()
    }
}

/// Values for a new attempt row
#[derive(Debug, Clone)]
pub struct NewAttempt<'a> {
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub language: &'a str,
    pub code: &'a str,
    pub code_sha256: &'a str,
    pub results: &'a [CaseResult],
    pub summary: Summary,
    pub badge_earned: bool,
}
