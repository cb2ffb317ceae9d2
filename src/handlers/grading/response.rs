//! Grading response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::{
    judge::{CaseView, GradeReport, Summary},
    models::RewardSummary,
};

/// Run tests response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestsResponse {
    pub success: bool,
    pub results: Vec<CaseView>,
    pub summary: Summary,
    pub badge_earned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards: Option<RewardSummary>,
}

impl RunTestsResponse {
    pub fn from_report(report: &GradeReport) -> Self {
        Self {
            success: true,
            results: report.client_results(),
            summary: report.summary,
            badge_earned: report.badge_earned,
            attempt_id: None,
            rewards: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::CaseResult;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let report = GradeReport::from_cases(vec![CaseResult {
            passed: true,
            input: json!([1, 2]),
            expected_output: Some(json!(3)),
            actual_output: Some(json!(3)),
            error: None,
            is_hidden: false,
            duration_ms: 4,
        }]);

        let body = serde_json::to_value(RunTestsResponse::from_report(&report)).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["summary"], json!({"passed": 1, "total": 1}));
        assert_eq!(body["badgeEarned"], json!(true));
        assert_eq!(body["results"][0]["actualOutput"], json!(3));
        assert!(body.get("attemptId").is_none());
    }
}
