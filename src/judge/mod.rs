//! Code runner
//!
//! Executes untrusted submissions against test cases:
//!
//! 1. **Languages** (`languages/`): per-language harness programs that call
//!    the submitted function and report its return value on a marker line.
//! 2. **Sandboxes** (`sandbox.rs`, `container.rs`, `process.rs`): isolated
//!    execution backends behind one trait.
//! 3. **Grader** (`runner.rs`): bounded-parallel execution, reference and
//!    validation routines, result aggregation (`verdict.rs`).

pub mod compare;
pub mod container;
pub mod languages;
pub mod process;
pub mod runner;
pub mod sandbox;
pub mod verdict;

use std::sync::Arc;
use std::time::Duration;

use bollard::Docker;

use crate::{
    config::{Config, SandboxBackend},
    error::AppResult,
};

pub use container::DockerSandbox;
pub use languages::Language;
pub use process::ProcessSandbox;
pub use runner::{Grader, GradingJob, JudgeCase};
pub use sandbox::{ExecutionOutcome, ExecutionRequest, ResourceLimits, Sandbox};
pub use verdict::{CaseResult, CaseView, ExecutionError, ExecutionErrorKind, GradeReport, Summary};

impl Grader {
    /// Build a grader for the configured sandbox backend
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let sandbox: Arc<dyn Sandbox> = match config.sandbox.backend {
            SandboxBackend::Docker => {
                let docker = match &config.sandbox.docker_socket {
                    Some(socket) => Docker::connect_with_socket(socket, 120, bollard::API_DEFAULT_VERSION)?,
                    None => Docker::connect_with_socket_defaults()?,
                };

                let version = docker.version().await?;
                tracing::info!(
                    "Connected to Docker version: {}",
                    version.version.unwrap_or_default()
                );

                Arc::new(DockerSandbox::new(docker))
            }
            SandboxBackend::Process => {
                tracing::warn!("Using the process sandbox; submissions are not isolated from the host");
                Arc::new(ProcessSandbox::new(&config.sandbox))
            }
        };

        Ok(Self::new(
            sandbox,
            config.sandbox.memory_limit_mb,
            config.grading.max_parallel_cases,
        )
        .with_budget(Duration::from_millis(config.grading.budget_ms)))
    }
}
