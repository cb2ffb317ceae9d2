//! Ticket response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{TestCase, Ticket};

/// Public ticket view: hidden cases and judge code are never included
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub language: String,
    pub test_cases: Vec<TestCase>,
    pub hidden_test_count: usize,
    pub entry_point: Option<String>,
    pub tags: Vec<String>,
    pub points: i32,
    pub time_limit_ms: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            test_cases: ticket.visible_test_cases(),
            hidden_test_count: ticket.hidden_test_count(),
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            difficulty: ticket.difficulty,
            language: ticket.language,
            entry_point: ticket.entry_point,
            tags: ticket.tags,
            points: ticket.points,
            time_limit_ms: ticket.time_limit_ms,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

/// Ticket summary for list views
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSummary {
    pub id: Uuid,
    pub title: String,
    pub difficulty: String,
    pub language: String,
    pub tags: Vec<String>,
    pub points: i32,
    pub test_count: usize,
}

impl From<Ticket> for TicketSummary {
    fn from(ticket: Ticket) -> Self {
        Self {
            test_count: ticket.test_cases.len(),
            id: ticket.id,
            title: ticket.title,
            difficulty: ticket.difficulty,
            language: ticket.language,
            tags: ticket.tags,
            points: ticket.points,
        }
    }
}

/// Ticket list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketsListResponse {
    pub tickets: Vec<TicketSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::types::Json;

    #[test]
    fn test_public_view_hides_judge_material() {
        let ticket = Ticket {
            id: Uuid::new_v4(),
            title: "Sum".to_string(),
            description: "Add".to_string(),
            difficulty: "easy".to_string(),
            language: "javascript".to_string(),
            test_cases: Json(vec![
                TestCase {
                    input: json!([1, 2]),
                    expected_output: Some(json!(3)),
                    is_hidden: false,
                },
                TestCase {
                    input: json!(["SECRET_INPUT"]),
                    expected_output: Some(json!("SECRET_OUTPUT")),
                    is_hidden: true,
                },
            ]),
            reference_code: Some("function add(a,b){return a+b}".to_string()),
            validation_code: Some("function validate(){return true}".to_string()),
            entry_point: None,
            tags: Vec::new(),
            points: 10,
            time_limit_ms: 2_000,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let body = serde_json::to_string(&TicketResponse::from(ticket)).unwrap();
        assert!(!body.contains("SECRET_INPUT"));
        assert!(!body.contains("SECRET_OUTPUT"));
        assert!(!body.contains("referenceCode"));
        assert!(!body.contains("validationCode"));
        assert!(!body.contains("a+b"));
        assert!(body.contains("\"hiddenTestCount\":1"));
    }
}
