//! Docker container sandbox
//!
//! Every execution gets its own container: no network, read-only root file
//! system, a small tmpfs workspace, memory/CPU/PID limits, all capabilities
//! dropped. The container is removed after the run whatever the outcome.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use bollard::{
    Docker,
    container::LogOutput,
    exec::{CreateExecOptions, StartExecResults},
    models::{ContainerCreateBody, HostConfig},
    query_parameters::{CreateContainerOptionsBuilder, RemoveContainerOptionsBuilder},
};
use futures::StreamExt;
use tokio::time::{Duration, timeout};
use uuid::Uuid;

use crate::{
    constants::{CPU_LIMIT, HOST_TIMEOUT_GRACE_MS, MAX_CAPTURED_OUTPUT_BYTES, SANDBOX_PIDS_LIMIT},
    error::{AppError, AppResult},
};

use super::{
    languages::Language,
    sandbox::{ExecutionOutcome, ExecutionRequest, Sandbox, truncate_output},
};

const WORKSPACE: &str = "/workspace";

/// Exit status of coreutils/busybox `timeout` when the limit is hit
const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit status of a process killed by SIGKILL
const SIGKILL_EXIT_CODE: i32 = 137;

/// Docker-backed sandbox
pub struct DockerSandbox {
    docker: Docker,
}

/// Raw result of one exec inside a container
struct ExecResult {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

impl DockerSandbox {
    /// Create a new Docker sandbox
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Create a container for one execution
    async fn create_container(&self, language: Language, memory_limit_mb: u64, lifetime_secs: u64) -> AppResult<String> {
        let container_name = format!("codequest-run-{}", Uuid::new_v4());

        let options = CreateContainerOptionsBuilder::default()
            .name(&container_name)
            .build();

        let memory_bytes = (memory_limit_mb * 1024 * 1024) as i64;
        let host_config = HostConfig {
            memory: Some(memory_bytes),
            memory_swap: Some(memory_bytes),
            cpu_period: Some(100_000),
            cpu_quota: Some((100_000.0 * CPU_LIMIT) as i64),
            network_mode: Some("none".to_string()),
            pids_limit: Some(SANDBOX_PIDS_LIMIT),
            readonly_rootfs: Some(true),
            cap_drop: Some(vec!["ALL".to_string()]),
            security_opt: Some(vec!["no-new-privileges".to_string()]),
            tmpfs: Some(HashMap::from([(
                WORKSPACE.to_string(),
                "rw,size=16m,mode=1777".to_string(),
            )])),
            ..Default::default()
        };

        let config = ContainerCreateBody {
            image: Some(language.container_image().to_string()),
            cmd: Some(vec!["sleep".to_string(), lifetime_secs.to_string()]),
            user: Some("65534:65534".to_string()),
            host_config: Some(host_config),
            working_dir: Some(WORKSPACE.to_string()),
            env: Some(vec!["LANG=C.UTF-8".to_string()]),
            network_disabled: Some(true),
            labels: Some(HashMap::from([(
                "codequest.sandbox".to_string(),
                language.as_str().to_string(),
            )])),
            ..Default::default()
        };

        let container = self.docker.create_container(Some(options), config).await?;

        Ok(container.id)
    }

    async fn start_container(&self, container_id: &str) -> AppResult<()> {
        self.docker
            .start_container(container_id, None::<bollard::query_parameters::StartContainerOptions>)
            .await?;

        Ok(())
    }

    /// Write the program into the workspace and run it
    async fn run_program(&self, container_id: &str, request: &ExecutionRequest) -> AppResult<ExecutionOutcome> {
        let program_path = format!("{}/{}", WORKSPACE, request.language.source_file());
        self.write_file(container_id, &program_path, &request.program)
            .await?;

        let time_limit_ms = request.limits.time_limit_ms;
        let mut command = vec![
            "timeout".to_string(),
            "-s".to_string(),
            "KILL".to_string(),
            format!("{:.3}", time_limit_ms as f64 / 1000.0),
        ];
        command.extend(request.language.container_command(request.limits.memory_limit_mb));
        command.push(program_path);

        let start = Instant::now();
        let result = self.exec_command(container_id, command).await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let killed = result.exit_code == TIMEOUT_EXIT_CODE || result.exit_code == SIGKILL_EXIT_CODE;
        if duration_ms >= time_limit_ms || (killed && duration_ms + 50 >= time_limit_ms) {
            return Ok(ExecutionOutcome::TimedOut { duration_ms });
        }

        let (stdout, output_truncated) = truncate_output(result.stdout, MAX_CAPTURED_OUTPUT_BYTES);
        let (stderr, _) = truncate_output(result.stderr, MAX_CAPTURED_OUTPUT_BYTES);

        Ok(ExecutionOutcome::Completed {
            stdout,
            stderr,
            exit_code: result.exit_code,
            duration_ms,
            output_truncated,
        })
    }


    /// Write a file to the container
    async fn write_file(&self, container_id: &str, path: &str, content: &str) -> AppResult<()> {
        // base64 keeps quotes and newlines in user code away from the shell
        let encoded = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, content);
        let cmd = format!("echo '{}' | base64 -d > {}", encoded, path);

        let result = self
            .exec_command(container_id, vec!["/bin/sh".to_string(), "-c".to_string(), cmd])
            .await?;

        if result.exit_code != 0 {
            return Err(AppError::Docker(format!(
                "Failed to write {}: {}",
                path, result.stderr
            )));
        }

        Ok(())
    }

    /// Execute a command in the container
    async fn exec_command(&self, container_id: &str, cmd: Vec<String>) -> AppResult<ExecResult> {
        let exec = self
            .docker
            .create_exec(
                container_id,
                CreateExecOptions {
                    cmd: Some(cmd),
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    ..Default::default()
                },
            )
            .await?;

        let output = self.docker.start_exec(&exec.id, None).await?;

        let mut stdout = String::new();
        let mut stderr = String::new();

        if let StartExecResults::Attached { mut output, .. } = output {
            while let Some(msg) = output.next().await {
                match msg? {
                    LogOutput::StdOut { message } => {
                        if stdout.len() <= MAX_CAPTURED_OUTPUT_BYTES {
                            stdout.push_str(&String::from_utf8_lossy(&message));
                        }
                    }
                    LogOutput::StdErr { message } => {
                        if stderr.len() <= MAX_CAPTURED_OUTPUT_BYTES {
                            stderr.push_str(&String::from_utf8_lossy(&message));
                        }
                    }
                    _ => {}
                }
            }
        }

        let inspect = self.docker.inspect_exec(&exec.id).await?;
        let exit_code = inspect.exit_code.unwrap_or(-1) as i32;

        Ok(ExecResult {
            stdout,
            stderr,
            exit_code,
        })
    }
}

#[async_trait]
impl Sandbox for DockerSandbox {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn execute(&self, request: ExecutionRequest) -> AppResult<ExecutionOutcome> {
        // The container outlives the run only by the host grace period
        let lifetime_secs = (request.limits.time_limit_ms + HOST_TIMEOUT_GRACE_MS) / 1000 + 30;
        let container_id = self
            .create_container(request.language, request.limits.memory_limit_mb, lifetime_secs)
            .await?;
        let mut guard = ContainerGuard::new(self.docker.clone(), container_id);

        self.start_container(guard.id()).await?;

        let host_limit = Duration::from_millis(request.limits.time_limit_ms + HOST_TIMEOUT_GRACE_MS);
        let result = match timeout(host_limit, self.run_program(guard.id(), &request)).await {
            Ok(result) => result,
            Err(_) => Ok(ExecutionOutcome::TimedOut {
                duration_ms: host_limit.as_millis() as u64,
            }),
        };

        guard.remove().await;

        result
    }
}

/// Force-removes its container; when dropped before [`ContainerGuard::remove`]
/// ran, removal continues on a spawned task
struct ContainerGuard {
    docker: Docker,
    id: String,
    removed: bool,
}

impl ContainerGuard {
    fn new(docker: Docker, id: String) -> Self {
        Self {
            docker,
            id,
            removed: false,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    async fn remove(&mut self) {
        remove_container(&self.docker, &self.id).await;
        self.removed = true;
    }
}

impl Drop for ContainerGuard {
    fn drop(&mut self) {
        if self.removed {
            return;
        }

        let docker = self.docker.clone();
        let id = std::mem::take(&mut self.id);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { remove_container(&docker, &id).await });
            }
            Err(_) => {
                tracing::warn!(container_id = %id, "No runtime to remove sandbox container");
            }
        }
    }
}

async fn remove_container(docker: &Docker, container_id: &str) {
    let options = RemoveContainerOptionsBuilder::default()
        .force(true)
        .build();

    if let Err(e) = docker.remove_container(container_id, Some(options)).await {
        tracing::warn!(container_id = %container_id, error = %e, "Failed to remove sandbox container");
    }
}
