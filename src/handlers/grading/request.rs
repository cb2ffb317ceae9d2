//! Grading request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::TestCase,
    utils::validation::{validate_entry_point, validate_language},
};

/// Run tests request
///
/// With `ticketId` the ticket supplies test cases and judge code; without it
/// the client's `testCases` are graded and nothing is stored.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RunTestsRequest {
    pub code: Option<String>,

    #[validate(custom(function = "validate_language"))]
    pub language: Option<String>,

    pub ticket_id: Option<Uuid>,

    pub test_cases: Option<Vec<TestCase>>,

    pub reference_code: Option<String>,

    pub validation_code: Option<String>,

    #[validate(custom(function = "validate_entry_point"))]
    pub entry_point: Option<String>,
}
