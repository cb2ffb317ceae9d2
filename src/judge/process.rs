//! Local process sandbox
//!
//! Runs the interpreter directly on the host in a fresh temporary directory
//! with a cleared environment. It has no network or file system isolation,
//! so it is meant for development and tests; production uses the Docker
//! backend.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use crate::{
    config::SandboxConfig,
    constants::MAX_CAPTURED_OUTPUT_BYTES,
    error::{AppError, AppResult},
};

use super::{
    languages::Language,
    sandbox::{ExecutionOutcome, ExecutionRequest, Sandbox, truncate_output},
};

/// Process-based sandbox
pub struct ProcessSandbox {
    node_binary: String,
    python_binary: String,
}

impl ProcessSandbox {
    /// Create a new process sandbox
    pub fn new(config: &SandboxConfig) -> Self {
        Self {
            node_binary: config.node_binary.clone(),
            python_binary: config.python_binary.clone(),
        }
    }

    fn command(&self, language: Language, memory_limit_mb: u64) -> Command {
        match language {
            Language::JavaScript => {
                let mut cmd = Command::new(&self.node_binary);
                cmd.arg(format!("--max-old-space-size={}", memory_limit_mb.max(16)));
                cmd
            }
            Language::Python => Command::new(&self.python_binary),
        }
    }
}

#[async_trait]
impl Sandbox for ProcessSandbox {
    fn name(&self) -> &'static str {
        "process"
    }

    async fn execute(&self, request: ExecutionRequest) -> AppResult<ExecutionOutcome> {
        let workdir = tempfile::tempdir()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create workdir: {}", e)))?;
        let program_path = workdir.path().join(request.language.source_file());

        tokio::fs::write(&program_path, &request.program)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write program: {}", e)))?;

        let mut cmd = self.command(request.language, request.limits.memory_limit_mb);
        cmd.arg(&program_path)
            .current_dir(workdir.path())
            .env_clear()
            .env("PATH", std::env::var("PATH").unwrap_or_default())
            .env("LANG", "C.UTF-8")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to spawn interpreter: {}", e)))?;

        let start = Instant::now();
        let limit = Duration::from_millis(request.limits.time_limit_ms);

        // Dropping the future on timeout kills the child (kill_on_drop)
        match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                let (stdout, output_truncated) = truncate_output(
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                    MAX_CAPTURED_OUTPUT_BYTES,
                );
                let (stderr, _) = truncate_output(
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                    MAX_CAPTURED_OUTPUT_BYTES,
                );

                let exit_code = match output.status.code() {
                    Some(code) => code,
                    None => {
                        #[cfg(unix)]
                        {
                            use std::os::unix::process::ExitStatusExt;
                            output.status.signal().map(|s| 128 + s).unwrap_or(-1)
                        }
                        #[cfg(not(unix))]
                        {
                            -1
                        }
                    }
                };

                Ok(ExecutionOutcome::Completed {
                    stdout,
                    stderr,
                    exit_code,
                    duration_ms,
                    output_truncated,
                })
            }
            Ok(Err(e)) => Err(AppError::Internal(anyhow::anyhow!(
                "Failed to execute process: {}",
                e
            ))),
            Err(_) => Ok(ExecutionOutcome::TimedOut {
                duration_ms: start.elapsed().as_millis() as u64,
            }),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::judge::sandbox::ResourceLimits;

    /// Routes "python" programs through `sh` so the tests need no interpreter
    fn shell_sandbox() -> ProcessSandbox {
        ProcessSandbox {
            node_binary: "node".to_string(),
            python_binary: "sh".to_string(),
        }
    }

    fn request(program: &str, time_limit_ms: u64) -> ExecutionRequest {
        ExecutionRequest {
            language: Language::Python,
            program: program.to_string(),
            limits: ResourceLimits {
                time_limit_ms,
                memory_limit_mb: 64,
            },
        }
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let outcome = shell_sandbox()
            .execute(request("echo hello; exit 3", 5_000))
            .await
            .unwrap();

        match outcome {
            ExecutionOutcome::Completed {
                stdout, exit_code, ..
            } => {
                assert_eq!(stdout.trim(), "hello");
                assert_eq!(exit_code, 3);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_times_out() {
        let outcome = shell_sandbox()
            .execute(request("sleep 5", 200))
            .await
            .unwrap();
        assert!(matches!(outcome, ExecutionOutcome::TimedOut { .. }));
    }

    #[tokio::test]
    async fn test_environment_is_cleared() {
        // SAFETY: test-local variable, read back only by the child process
        unsafe { std::env::set_var("CODEQUEST_SECRET_FOR_TEST", "leaked") };

        let outcome = shell_sandbox()
            .execute(request("echo \"[$CODEQUEST_SECRET_FOR_TEST]\"", 5_000))
            .await
            .unwrap();

        match outcome {
            ExecutionOutcome::Completed { stdout, .. } => assert_eq!(stdout.trim(), "[]"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_runs_start_in_fresh_directories() {
        let sandbox = shell_sandbox();
        sandbox
            .execute(request("echo state > leftover.txt", 5_000))
            .await
            .unwrap();

        let outcome = sandbox
            .execute(request("test -f leftover.txt && echo found || echo clean", 5_000))
            .await
            .unwrap();

        match outcome {
            ExecutionOutcome::Completed { stdout, .. } => assert_eq!(stdout.trim(), "clean"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
