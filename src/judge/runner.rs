//! Grader - runs a submission against its test cases
//!
//! Cases run with bounded parallelism through the configured [`Sandbox`] and
//! are reassembled in input order. A failing case never aborts the others;
//! a failing reference or validation routine aborts the whole job.

use std::sync::Arc;
use std::time::Instant;

use futures::{StreamExt, TryStreamExt, stream};
use serde_json::Value;
use tokio::time::{Duration, timeout};

use crate::{
    constants::{
        DEFAULT_GRADING_BUDGET_MS, DEFAULT_MAX_PARALLEL_CASES, HOST_TIMEOUT_GRACE_MS, MAX_TEST_CASES, MAX_TIME_LIMIT_MS,
        MIN_TIME_LIMIT_MS, SANDBOX_SETUP_ALLOWANCE_MS,
    },
    error::{AppError, AppResult},
    utils::format_milliseconds,
};

use super::{
    compare::{is_truthy, preview, truncate_message, values_equal},
    languages::{HarnessReport, Language, arguments_for},
    sandbox::{ExecutionOutcome, ExecutionRequest, ResourceLimits, Sandbox},
    verdict::{CaseResult, ExecutionError, ExecutionErrorKind, GradeReport},
};

/// Function name a validation routine must define
pub const VALIDATION_ENTRY_POINT: &str = "validate";

/// One test case as the grader sees it
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeCase {
    pub input: Value,
    /// Absent when the reference solution computes it
    pub expected: Option<Value>,
    pub hidden: bool,
}

/// Everything needed to grade one submission
#[derive(Debug, Clone)]
pub struct GradingJob {
    pub language: Language,
    pub code: String,
    pub entry_point: Option<String>,
    pub cases: Vec<JudgeCase>,
    pub reference_code: Option<String>,
    pub validation_code: Option<String>,
    pub time_limit_ms: u64,
}

/// Code runner bound to one sandbox backend
#[derive(Clone)]
pub struct Grader {
    sandbox: Arc<dyn Sandbox>,
    memory_limit_mb: u64,
    max_parallel: usize,
    budget: Duration,
}

impl Grader {
    /// Create a new grader
    pub fn new(sandbox: Arc<dyn Sandbox>, memory_limit_mb: u64, max_parallel: usize) -> Self {
        Self {
            sandbox,
            memory_limit_mb,
            max_parallel: if max_parallel == 0 {
                DEFAULT_MAX_PARALLEL_CASES
            } else {
                max_parallel
            },
            budget: Duration::from_millis(DEFAULT_GRADING_BUDGET_MS),
        }
    }

    /// Replace the wall-clock budget of one grading run
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Wall-clock budget of one grading run
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Sandbox backend name
    pub fn backend(&self) -> &'static str {
        self.sandbox.name()
    }

    /// Grade a submission; running past the budget aborts the whole job
    pub async fn grade(&self, job: GradingJob) -> AppResult<GradeReport> {
        match timeout(self.budget, self.grade_within_budget(job)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    backend = self.backend(),
                    budget_ms = self.budget.as_millis() as u64,
                    "Grading budget exhausted"
                );
                Err(AppError::Pipeline(format!(
                    "Grading did not finish within {}",
                    format_milliseconds(self.budget.as_millis() as u64)
                )))
            }
        }
    }

    async fn grade_within_budget(&self, job: GradingJob) -> AppResult<GradeReport> {
        if job.code.trim().is_empty() {
            return Err(AppError::Validation("Code must not be empty".to_string()));
        }
        if job.cases.is_empty() {
            return Err(AppError::Validation(
                "At least one test case is required".to_string(),
            ));
        }
        if job.cases.len() > MAX_TEST_CASES {
            return Err(AppError::Validation(format!(
                "At most {} test cases are allowed",
                MAX_TEST_CASES
            )));
        }

        let entry_point = resolve_entry_point(job.language, &job.code, job.entry_point.as_deref())?;
        let limits = ResourceLimits {
            time_limit_ms: job.time_limit_ms.clamp(MIN_TIME_LIMIT_MS, MAX_TIME_LIMIT_MS),
            memory_limit_mb: self.memory_limit_mb,
        };

        let started = Instant::now();
        let expected = self.resolve_expected(&job, &entry_point, limits).await?;

        let outcomes: Vec<(Result<Value, ExecutionError>, u64)> = stream::iter(job.cases.iter())
            .map(|case| self.run_case(job.language, &job.code, &entry_point, &case.input, limits))
            .buffered(self.max_parallel)
            .boxed()
            .collect()
            .await;

        let verdicts = match job.validation_code.as_deref() {
            Some(validation_code) => {
                self.validate_all(&job, validation_code, &outcomes, &expected, limits)
                    .await?
            }
            None => outcomes
                .iter()
                .zip(&expected)
                .map(|((outcome, _), expected)| match (outcome, expected) {
                    (Ok(actual), Some(expected)) => values_equal(actual, expected),
                    _ => false,
                })
                .collect(),
        };

        let results: Vec<CaseResult> = job
            .cases
            .into_iter()
            .zip(outcomes)
            .zip(expected)
            .zip(verdicts)
            .map(|(((case, (outcome, duration_ms)), expected), passed)| {
                let (actual_output, error) = match outcome {
                    Ok(value) => (Some(preview(&value)), None),
                    Err(e) => (None, Some(e)),
                };
                CaseResult {
                    passed: passed && error.is_none(),
                    input: case.input,
                    expected_output: expected,
                    actual_output,
                    error,
                    is_hidden: case.hidden,
                    duration_ms,
                }
            })
            .collect();

        let report = GradeReport::from_cases(results);

        tracing::info!(
            language = %job.language,
            backend = self.backend(),
            passed = report.summary.passed,
            total = report.summary.total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Submission graded"
        );

        Ok(report)
    }

    /// Fill missing expected outputs by running the reference solution
    async fn resolve_expected(
        &self,
        job: &GradingJob,
        submission_entry: &str,
        limits: ResourceLimits,
    ) -> AppResult<Vec<Option<Value>>> {
        let missing = job.cases.iter().any(|c| c.expected.is_none());
        if !missing {
            return Ok(job.cases.iter().map(|c| c.expected.clone()).collect());
        }

        let reference_code = match job.reference_code.as_deref() {
            Some(code) if !code.trim().is_empty() => code,
            // A validation routine may judge without an expected output
            _ if job.validation_code.is_some() => {
                return Ok(job.cases.iter().map(|c| c.expected.clone()).collect());
            }
            _ => {
                return Err(AppError::Pipeline(
                    "Test case has no expected output and no reference solution".to_string(),
                ));
            }
        };

        // A configured entry point names the function in both programs
        let reference_entry = match job.entry_point.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => job
                .language
                .detect_entry_point(reference_code)
                .unwrap_or_else(|| submission_entry.to_string()),
        };

        stream::iter(job.cases.iter().enumerate())
            .map(|(index, case)| {
                let reference_entry = reference_entry.as_str();
                async move {
                    if let Some(expected) = &case.expected {
                        return Ok(Some(expected.clone()));
                    }

                    let (outcome, _) = self
                        .run_case(job.language, reference_code, reference_entry, &case.input, limits)
                        .await;

                    outcome.map(Some).map_err(|e| {
                        AppError::Pipeline(format!(
                            "Reference solution failed on test case {}: {}: {}",
                            index + 1,
                            e.kind,
                            e.message
                        ))
                    })
                }
            })
            .buffered(self.max_parallel)
            .boxed()
            .try_collect()
            .await
    }

    /// Judge every produced output with the validation routine
    async fn validate_all(
        &self,
        job: &GradingJob,
        validation_code: &str,
        outcomes: &[(Result<Value, ExecutionError>, u64)],
        expected: &[Option<Value>],
        limits: ResourceLimits,
    ) -> AppResult<Vec<bool>> {
        stream::iter(job.cases.iter().zip(outcomes).zip(expected).enumerate())
            .map(|(index, ((case, (outcome, _)), expected))| async move {
                let Ok(actual) = outcome else {
                    return Ok(false);
                };

                let args = Value::Array(vec![
                    case.input.clone(),
                    actual.clone(),
                    expected.clone().unwrap_or(Value::Null),
                ]);
                let (verdict, _) = self
                    .run_case(job.language, validation_code, VALIDATION_ENTRY_POINT, &args, limits)
                    .await;

                verdict.map(|v| is_truthy(&v)).map_err(|e| {
                    AppError::Pipeline(format!(
                        "Validation routine failed on test case {}: {}: {}",
                        index + 1,
                        e.kind,
                        e.message
                    ))
                })
            })
            .buffered(self.max_parallel)
            .boxed()
            .try_collect()
            .await
    }

    /// Run one function call in the sandbox
    async fn run_case(
        &self,
        language: Language,
        code: &str,
        entry_point: &str,
        input: &Value,
        limits: ResourceLimits,
    ) -> (Result<Value, ExecutionError>, u64) {
        let program = match language.build_program(code, entry_point, &arguments_for(input)) {
            Ok(program) => program,
            Err(e) => {
                return (
                    Err(ExecutionError::new(ExecutionErrorKind::SandboxError, e.to_string())),
                    0,
                );
            }
        };

        let request = ExecutionRequest {
            language,
            program,
            limits,
        };

        let started = Instant::now();
        // Backends enforce the run limit themselves; this bound also covers setup and cleanup
        let host_limit = Duration::from_millis(
            limits.time_limit_ms + HOST_TIMEOUT_GRACE_MS + SANDBOX_SETUP_ALLOWANCE_MS,
        );

        let outcome = match timeout(host_limit, self.sandbox.execute(request)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                tracing::warn!(backend = self.backend(), error = %e, "Sandbox execution failed");
                return (
                    Err(ExecutionError::new(
                        ExecutionErrorKind::SandboxError,
                        "Sandbox failed to execute the program",
                    )),
                    started.elapsed().as_millis() as u64,
                );
            }
            Err(_) => {
                return (
                    Err(ExecutionError::timeout(limits.time_limit_ms)),
                    started.elapsed().as_millis() as u64,
                );
            }
        };

        classify(outcome, limits)
    }
}

/// Pick the function to call
fn resolve_entry_point(language: Language, code: &str, configured: Option<&str>) -> AppResult<String> {
    if let Some(name) = configured.map(str::trim).filter(|n| !n.is_empty()) {
        return Ok(name.to_string());
    }

    language.detect_entry_point(code).ok_or_else(|| {
        AppError::Validation("Submission must define a function to test".to_string())
    })
}

/// Turn a raw sandbox outcome into an output or an execution error
fn classify(outcome: ExecutionOutcome, limits: ResourceLimits) -> (Result<Value, ExecutionError>, u64) {
    match outcome {
        ExecutionOutcome::TimedOut { duration_ms } => {
            (Err(ExecutionError::timeout(limits.time_limit_ms)), duration_ms)
        }
        ExecutionOutcome::Completed {
            stdout,
            stderr,
            exit_code,
            duration_ms,
            output_truncated,
        } => {
            let result = match HarnessReport::parse(&stdout) {
                Some(HarnessReport::Ok { value }) => Ok(value),
                Some(HarnessReport::SyntaxError { message }) => Err(ExecutionError::new(
                    ExecutionErrorKind::SyntaxError,
                    truncate_message(&message),
                )),
                Some(HarnessReport::RuntimeError { message }) => {
                    let kind = if is_memory_error(&message) {
                        ExecutionErrorKind::MemoryLimitExceeded
                    } else {
                        ExecutionErrorKind::RuntimeError
                    };
                    Err(ExecutionError::new(kind, truncate_message(&message)))
                }
                None if output_truncated => Err(ExecutionError::new(
                    ExecutionErrorKind::OutputLimitExceeded,
                    "Output limit exceeded",
                )),
                None if is_memory_error(&stderr) || exit_code == 137 => Err(ExecutionError::new(
                    ExecutionErrorKind::MemoryLimitExceeded,
                    format!("Memory limit of {} MB exceeded", limits.memory_limit_mb),
                )),
                None => {
                    let message = if stderr.trim().is_empty() {
                        format!("Process exited with code {} without a result", exit_code)
                    } else {
                        truncate_message(&stderr)
                    };
                    Err(ExecutionError::new(ExecutionErrorKind::RuntimeError, message))
                }
            };
            (result, duration_ms)
        }
    }
}

fn is_memory_error(message: &str) -> bool {
    message.contains("heap out of memory")
        || message.contains("Allocation failed")
        || message.starts_with("MemoryError")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HARNESS_RESULT_MARKER;
    use crate::judge::sandbox::MockSandbox;
    use crate::judge::verdict::Summary;
    use async_trait::async_trait;
    use serde_json::json;

    /// Pull the JSON literal assigned to `const <name> =` out of a JS harness
    fn js_literal(program: &str, name: &str) -> String {
        let prefix = format!("const {} = ", name);
        let line = program
            .lines()
            .find(|l| l.starts_with(&prefix))
            .expect("harness line present");
        let literal = line[prefix.len()..].trim_end_matches(';');
        let literal = literal
            .strip_prefix("JSON.parse(")
            .and_then(|l| l.strip_suffix(')'))
            .unwrap_or(literal);
        serde_json::from_str::<String>(literal).expect("string literal")
    }

    fn js_args(program: &str) -> Vec<Value> {
        serde_json::from_str(&js_literal(program, "__args")).unwrap()
    }

    fn ok_stdout(value: Value) -> String {
        format!(
            "console noise\n{}{}\n",
            HARNESS_RESULT_MARKER,
            json!({"status": "ok", "value": value})
        )
    }

    fn completed(stdout: String) -> ExecutionOutcome {
        ExecutionOutcome::Completed {
            stdout,
            stderr: String::new(),
            exit_code: 0,
            duration_ms: 3,
            output_truncated: false,
        }
    }

    /// Evaluates `add`/`sub` submissions arithmetically
    fn arithmetic_sandbox() -> MockSandbox {
        let mut sandbox = MockSandbox::new();
        sandbox.expect_name().return_const("mock");
        sandbox.expect_execute().returning(|request| {
            let source = js_literal(&request.program, "__source");
            let args = js_args(&request.program);
            let a = args[0].as_i64().unwrap();
            let b = args[1].as_i64().unwrap();
            let value = if source.contains("a + b") { a + b } else { a - b };
            Ok(completed(ok_stdout(json!(value))))
        });
        sandbox
    }

    fn job(code: &str, cases: Vec<JudgeCase>) -> GradingJob {
        GradingJob {
            language: Language::JavaScript,
            code: code.to_string(),
            entry_point: None,
            cases,
            reference_code: None,
            validation_code: None,
            time_limit_ms: 1_000,
        }
    }

    fn case(input: Value, expected: Option<Value>) -> JudgeCase {
        JudgeCase {
            input,
            expected,
            hidden: false,
        }
    }

    fn grader(sandbox: impl Sandbox + 'static) -> Grader {
        Grader::new(Arc::new(sandbox), 64, 4)
    }

    #[tokio::test]
    async fn test_correct_submission_passes_every_case() {
        let report = grader(arithmetic_sandbox())
            .grade(job(
                "function add(a,b){return a + b}",
                vec![
                    case(json!([1, 2]), Some(json!(3))),
                    case(json!([2, 2]), Some(json!(4))),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(report.summary, Summary { passed: 2, total: 2 });
        assert!(report.badge_earned);
    }

    #[tokio::test]
    async fn test_wrong_submission_reports_actual_outputs() {
        let report = grader(arithmetic_sandbox())
            .grade(job(
                "function add(a,b){return a - b}",
                vec![
                    case(json!([1, 2]), Some(json!(3))),
                    case(json!([2, 2]), Some(json!(4))),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(report.summary, Summary { passed: 0, total: 2 });
        assert!(!report.badge_earned);
        assert_eq!(report.results[0].actual_output, Some(json!(-1)));
        assert_eq!(report.results[1].actual_output, Some(json!(0)));
        assert!(report.results.iter().all(|r| r.error.is_none()));
    }

    #[tokio::test]
    async fn test_timeout_fails_only_its_case() {
        let mut sandbox = MockSandbox::new();
        sandbox.expect_name().return_const("mock");
        sandbox.expect_execute().returning(|request| {
            let args = js_args(&request.program);
            if args[0] == json!(0) {
                Ok(ExecutionOutcome::TimedOut { duration_ms: 1_000 })
            } else {
                Ok(completed(ok_stdout(args[0].clone())))
            }
        });

        let report = grader(sandbox)
            .grade(job(
                "function id(x){ while (x === 0) {} return x }",
                vec![
                    case(json!(1), Some(json!(1))),
                    case(json!(0), Some(json!(0))),
                    case(json!(2), Some(json!(2))),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(report.summary, Summary { passed: 2, total: 3 });
        assert_eq!(
            report.results[1].error.as_ref().map(|e| e.kind),
            Some(ExecutionErrorKind::Timeout)
        );
        assert!(report.results[0].passed && report.results[2].passed);
    }

    #[tokio::test]
    async fn test_harness_errors_are_classified() {
        let mut sandbox = MockSandbox::new();
        sandbox.expect_name().return_const("mock");
        sandbox.expect_execute().returning(|request| {
            let args = js_args(&request.program);
            let stdout = match args[0].as_i64() {
                Some(1) => format!(
                    "{}{}",
                    HARNESS_RESULT_MARKER,
                    json!({"status": "runtime_error", "message": "TypeError: x is undefined"})
                ),
                Some(2) => format!(
                    "{}{}",
                    HARNESS_RESULT_MARKER,
                    json!({"status": "syntax_error", "message": "SyntaxError: Unexpected token"})
                ),
                _ => String::new(),
            };
            Ok(ExecutionOutcome::Completed {
                stdout,
                stderr: "Segmentation fault".to_string(),
                exit_code: 139,
                duration_ms: 1,
                output_truncated: false,
            })
        });

        let report = grader(sandbox)
            .grade(job(
                "function f(x){}",
                vec![
                    case(json!(1), Some(json!(1))),
                    case(json!(2), Some(json!(2))),
                    case(json!(3), Some(json!(3))),
                ],
            ))
            .await
            .unwrap();

        let kinds: Vec<_> = report
            .results
            .iter()
            .map(|r| r.error.as_ref().map(|e| e.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(ExecutionErrorKind::RuntimeError),
                Some(ExecutionErrorKind::SyntaxError),
                Some(ExecutionErrorKind::RuntimeError),
            ]
        );
        assert_eq!(report.summary.passed, 0);
    }

    #[tokio::test]
    async fn test_sandbox_failure_is_a_case_error() {
        let mut sandbox = MockSandbox::new();
        sandbox.expect_name().return_const("mock");
        sandbox
            .expect_execute()
            .returning(|_| Err(AppError::Docker("daemon unavailable".to_string())));

        let report = grader(sandbox)
            .grade(job("function f(x){return x}", vec![case(json!(1), Some(json!(1)))]))
            .await
            .unwrap();

        assert_eq!(
            report.results[0].error.as_ref().map(|e| e.kind),
            Some(ExecutionErrorKind::SandboxError)
        );
        assert!(!report.badge_earned);
    }

    /// Finishes earlier cases last to prove ordering is by input
    struct ReverseDelaySandbox;

    #[async_trait]
    impl Sandbox for ReverseDelaySandbox {
        fn name(&self) -> &'static str {
            "reverse-delay"
        }

        async fn execute(&self, request: ExecutionRequest) -> AppResult<ExecutionOutcome> {
            let n = js_args(&request.program)[0].as_u64().unwrap();
            tokio::time::sleep(Duration::from_millis((10 - n) * 15)).await;
            Ok(completed(ok_stdout(json!(n * 10))))
        }
    }

    /// Slow setup, an inner run timeout, then cleanup; like the container backend
    struct SlowSetupSandbox {
        cleaned_up: Arc<std::sync::atomic::AtomicBool>,
    }

    #[async_trait]
    impl Sandbox for SlowSetupSandbox {
        fn name(&self) -> &'static str {
            "slow-setup"
        }

        async fn execute(&self, request: ExecutionRequest) -> AppResult<ExecutionOutcome> {
            tokio::time::sleep(Duration::from_millis(300)).await;

            let run_limit =
                Duration::from_millis(request.limits.time_limit_ms + HOST_TIMEOUT_GRACE_MS);
            let outcome = match timeout(run_limit, std::future::pending::<()>()).await {
                Ok(()) => completed(ok_stdout(json!(null))),
                Err(_) => ExecutionOutcome::TimedOut {
                    duration_ms: run_limit.as_millis() as u64,
                },
            };

            tokio::time::sleep(Duration::from_millis(50)).await;
            self.cleaned_up
                .store(true, std::sync::atomic::Ordering::SeqCst);

            Ok(outcome)
        }
    }

    #[tokio::test]
    async fn test_timed_out_case_lets_sandbox_clean_up() {
        let cleaned_up = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let sandbox = SlowSetupSandbox {
            cleaned_up: cleaned_up.clone(),
        };

        let mut looping = job("function f(x){ for(;;){} }", vec![case(json!(1), Some(json!(1)))]);
        looping.time_limit_ms = 100;

        let report = grader(sandbox).grade(looping).await.unwrap();

        assert_eq!(
            report.results[0].error.as_ref().map(|e| e.kind),
            Some(ExecutionErrorKind::Timeout)
        );
        assert!(cleaned_up.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_exhausted_budget_is_pipeline_error() {
        let cases = (0..8).map(|n| case(json!(n), Some(json!(n * 10)))).collect();
        let result = grader(ReverseDelaySandbox)
            .with_budget(Duration::from_millis(50))
            .grade(job("function times10(n){return n * 10}", cases))
            .await;

        assert!(matches!(result, Err(AppError::Pipeline(_))));
    }

    #[tokio::test]
    async fn test_results_keep_input_order() {
        let cases = (0..8).map(|n| case(json!(n), Some(json!(n * 10)))).collect();
        let report = grader(ReverseDelaySandbox)
            .grade(job("function times10(n){return n * 10}", cases))
            .await
            .unwrap();

        let inputs: Vec<Value> = report.results.iter().map(|r| r.input.clone()).collect();
        assert_eq!(inputs, (0..8).map(|n| json!(n)).collect::<Vec<_>>());
        assert_eq!(report.summary, Summary { passed: 8, total: 8 });
    }

    #[tokio::test]
    async fn test_reference_solution_fills_missing_expected() {
        let mut submission = job(
            "function add(a,b){return a - b}",
            vec![case(json!([5, 3]), None), case(json!([1, 1]), Some(json!(2)))],
        );
        submission.reference_code = Some("function add(a,b){return a + b}".to_string());

        let report = grader(arithmetic_sandbox()).grade(submission).await.unwrap();

        assert_eq!(report.results[0].expected_output, Some(json!(8)));
        assert_eq!(report.results[0].actual_output, Some(json!(2)));
        assert_eq!(report.summary, Summary { passed: 0, total: 2 });
    }

    #[tokio::test]
    async fn test_reference_uses_configured_entry_point() {
        let mut sandbox = MockSandbox::new();
        sandbox.expect_name().return_const("mock");
        sandbox.expect_execute().returning(|request| {
            let entry = js_literal(&request.program, "__entry");
            let x = js_args(&request.program)[0].as_i64().unwrap();
            let value = if entry == "solve" { x * 2 } else { -1 };
            Ok(completed(ok_stdout(json!(value))))
        });

        let mut submission = job(
            "function solve(x){return x * 2}",
            vec![case(json!([4]), None)],
        );
        submission.entry_point = Some("solve".to_string());
        submission.reference_code = Some(
            "function helper(y){return y + y}\nfunction solve(x){return helper(x)}".to_string(),
        );

        let report = grader(sandbox).grade(submission).await.unwrap();

        assert_eq!(report.results[0].expected_output, Some(json!(8)));
        assert!(report.badge_earned);
    }

    #[tokio::test]
    async fn test_missing_expected_without_reference_is_pipeline_error() {
        let result = grader(arithmetic_sandbox())
            .grade(job(
                "function add(a,b){return a + b}",
                vec![case(json!([1, 2]), None)],
            ))
            .await;

        assert!(matches!(result, Err(AppError::Pipeline(_))));
    }

    #[tokio::test]
    async fn test_failing_reference_aborts_grading() {
        let mut sandbox = MockSandbox::new();
        sandbox.expect_name().return_const("mock");
        sandbox.expect_execute().returning(|request| {
            if js_literal(&request.program, "__source").contains("reference") {
                Ok(ExecutionOutcome::TimedOut { duration_ms: 1_000 })
            } else {
                Ok(completed(ok_stdout(json!(1))))
            }
        });

        let mut submission = job("function f(x){return 1}", vec![case(json!(1), None)]);
        submission.reference_code = Some("function f(x){ /* reference */ for(;;){} }".to_string());

        let result = grader(sandbox).grade(submission).await;
        assert!(matches!(result, Err(AppError::Pipeline(_))));
    }

    #[tokio::test]
    async fn test_validation_routine_decides_correctness() {
        let mut sandbox = MockSandbox::new();
        sandbox.expect_name().return_const("mock");
        sandbox.expect_execute().returning(|request| {
            let entry = js_literal(&request.program, "__entry");
            let args = js_args(&request.program);
            if entry == VALIDATION_ENTRY_POINT {
                // Accept any even output regardless of the expected value
                let even = args[1].as_i64().is_some_and(|v| v % 2 == 0);
                Ok(completed(ok_stdout(json!(even))))
            } else {
                Ok(completed(ok_stdout(args[0].clone())))
            }
        });

        let mut submission = job(
            "function echo(x){return x}",
            vec![case(json!(4), Some(json!(100))), case(json!(3), None)],
        );
        submission.validation_code =
            Some("function validate(input, actual, expected){ return actual % 2 === 0 }".to_string());

        let report = grader(sandbox).grade(submission).await.unwrap();
        assert!(report.results[0].passed);
        assert!(!report.results[1].passed);
        assert_eq!(report.summary, Summary { passed: 1, total: 2 });
    }

    #[tokio::test]
    async fn test_rejects_invalid_jobs() {
        let grader = grader(arithmetic_sandbox());

        let empty = grader.grade(job("function f(){}", Vec::new())).await;
        assert!(matches!(empty, Err(AppError::Validation(_))));

        let no_function = grader
            .grade(job("const x = 1;", vec![case(json!(1), Some(json!(1)))]))
            .await;
        assert!(matches!(no_function, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_memory_errors_are_classified() {
        let limits = ResourceLimits {
            time_limit_ms: 1_000,
            memory_limit_mb: 64,
        };
        let (result, _) = classify(
            ExecutionOutcome::Completed {
                stdout: String::new(),
                stderr: "FATAL ERROR: Reached heap limit Allocation failed - JavaScript heap out of memory"
                    .to_string(),
                exit_code: 134,
                duration_ms: 40,
                output_truncated: false,
            },
            limits,
        );
        assert_eq!(
            result.unwrap_err().kind,
            ExecutionErrorKind::MemoryLimitExceeded
        );

        let (result, _) = classify(
            ExecutionOutcome::Completed {
                stdout: "x".repeat(10),
                stderr: String::new(),
                exit_code: 0,
                duration_ms: 40,
                output_truncated: true,
            },
            limits,
        );
        assert_eq!(
            result.unwrap_err().kind,
            ExecutionErrorKind::OutputLimitExceeded
        );
    }
}
