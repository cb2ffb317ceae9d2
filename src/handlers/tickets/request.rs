//! Ticket request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_TICKET_DESCRIPTION_LENGTH, MAX_TICKET_TITLE_LENGTH},
    models::TestCase,
    utils::validation::{
        validate_difficulty, validate_entry_point, validate_language, validate_tags,
        validate_test_cases,
    },
};

/// Create ticket request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, max = MAX_TICKET_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_TICKET_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: String,

    #[validate(custom(function = "validate_language"))]
    pub language: String,

    #[validate(custom(function = "validate_test_cases"))]
    pub test_cases: Vec<TestCase>,

    /// Computes expected outputs the test cases leave out
    pub reference_code: Option<String>,

    /// Defines `validate(input, actual, expected)`
    pub validation_code: Option<String>,

    #[validate(custom(function = "validate_entry_point"))]
    pub entry_point: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(range(min = 0, max = 100_000))]
    #[serde(default)]
    pub points: i32,

    #[validate(range(min = 100, max = 10_000))]
    pub time_limit_ms: Option<i32>,
}

/// Update ticket request; absent fields stay unchanged
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    #[validate(length(min = 1, max = MAX_TICKET_TITLE_LENGTH))]
    pub title: Option<String>,

    #[validate(length(max = MAX_TICKET_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: Option<String>,

    #[validate(custom(function = "validate_test_cases"))]
    pub test_cases: Option<Vec<TestCase>>,

    pub reference_code: Option<String>,
    pub validation_code: Option<String>,

    #[validate(custom(function = "validate_entry_point"))]
    pub entry_point: Option<String>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,

    #[validate(range(min = 0, max = 100_000))]
    pub points: Option<i32>,

    #[validate(range(min = 100, max = 10_000))]
    pub time_limit_ms: Option<i32>,
}

/// List tickets query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub difficulty: Option<String>,
    pub language: Option<String>,
    pub tag: Option<String>,
}
