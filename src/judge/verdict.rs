//! Per-case results and submission summaries

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Why a case failed to produce an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionErrorKind {
    Timeout,
    RuntimeError,
    SyntaxError,
    OutputLimitExceeded,
    MemoryLimitExceeded,
    SandboxError,
}

impl ExecutionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::RuntimeError => "runtime_error",
            Self::SyntaxError => "syntax_error",
            Self::OutputLimitExceeded => "output_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::SandboxError => "sandbox_error",
        }
    }
}

impl std::fmt::Display for ExecutionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution failure of one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub message: String,
}

impl ExecutionError {
    pub fn new(kind: ExecutionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(time_limit_ms: u64) -> Self {
        Self::new(
            ExecutionErrorKind::Timeout,
            format!("Time limit of {} ms exceeded", time_limit_ms),
        )
    }
}

/// Result of one test case, as stored on the Attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub passed: bool,
    pub input: Value,
    #[serde(default)]
    pub expected_output: Option<Value>,
    #[serde(default)]
    pub actual_output: Option<Value>,
    #[serde(default)]
    pub error: Option<ExecutionError>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub duration_ms: u64,
}

impl CaseResult {
    /// Redacted view for API responses; hidden cases keep only the verdict
    pub fn client_view(&self) -> CaseView {
        if self.is_hidden {
            return CaseView {
                passed: self.passed,
                is_hidden: true,
                input: None,
                expected_output: None,
                actual_output: None,
                error: self.error.as_ref().map(|e| CaseErrorView {
                    kind: e.kind,
                    message: None,
                }),
            };
        }

        CaseView {
            passed: self.passed,
            is_hidden: false,
            input: Some(self.input.clone()),
            expected_output: self.expected_output.clone(),
            actual_output: self.actual_output.clone(),
            error: self.error.as_ref().map(|e| CaseErrorView {
                kind: e.kind,
                message: Some(e.message.clone()),
            }),
        }
    }
}

/// Client-facing case result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseView {
    pub passed: bool,
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CaseErrorView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseErrorView {
    pub kind: ExecutionErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{passed, total}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: i32,
    pub total: i32,
}

impl Summary {
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}

/// Outcome of grading one submission
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub results: Vec<CaseResult>,
    pub summary: Summary,
    pub badge_earned: bool,
}

impl GradeReport {
    /// Aggregate case results; the badge requires every case, hidden ones
    /// included, to pass
    pub fn from_cases(results: Vec<CaseResult>) -> Self {
        let summary = Summary {
            passed: results.iter().filter(|r| r.passed).count() as i32,
            total: results.len() as i32,
        };

        Self {
            badge_earned: summary.all_passed(),
            results,
            summary,
        }
    }

    pub fn client_results(&self) -> Vec<CaseView> {
        self.results.iter().map(CaseResult::client_view).collect()
    }
}
