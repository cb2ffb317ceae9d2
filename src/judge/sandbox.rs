//! Sandbox abstraction for running untrusted programs

use async_trait::async_trait;

use crate::error::AppResult;

use super::languages::Language;

/// Resource limits applied to one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLimits {
    pub time_limit_ms: u64,
    pub memory_limit_mb: u64,
}

/// A complete program to run once
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub language: Language,
    pub program: String,
    pub limits: ResourceLimits,
}

/// How an execution ended
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// Process exited on its own
    Completed {
        stdout: String,
        stderr: String,
        exit_code: i32,
        duration_ms: u64,
        /// Stdout exceeded the capture limit and was cut
        output_truncated: bool,
    },
    /// Killed after exceeding the time limit
    TimedOut { duration_ms: u64 },
}

/// Isolated execution backend.
///
/// Implementations must start every execution from a clean state: nothing a
/// previous program wrote may be visible to the next one. An `Err` means the
/// sandbox itself failed, not the program.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Run one program to completion or timeout
    async fn execute(&self, request: ExecutionRequest) -> AppResult<ExecutionOutcome>;
}

/// Cut captured output to `limit` bytes on a char boundary
pub fn truncate_output(mut output: String, limit: usize) -> (String, bool) {
    if output.len() <= limit {
        return (output, false);
    }

    let mut cut = limit;
    while !output.is_char_boundary(cut) {
        cut -= 1;
    }
    output.truncate(cut);
    (output, true)
}
