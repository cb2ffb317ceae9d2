//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once in `main` and handed to [`crate::AppState`].

use std::env;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_GRADING_BUDGET_MS, DEFAULT_MAX_PARALLEL_CASES, DEFAULT_MEMORY_LIMIT_MB,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_TIME_LIMIT_MS,
    MAX_TIME_LIMIT_MS, MIN_TIME_LIMIT_MS,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub sandbox: SandboxConfig,
    pub grading: GradingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_json: bool,
    pub request_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// JWT verification configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Which sandbox backend executes untrusted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxBackend {
    /// One throw-away container per execution
    Docker,
    /// Local interpreter process (development only, no network isolation)
    Process,
}

impl FromStr for SandboxBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docker" => Ok(Self::Docker),
            "process" => Ok(Self::Process),
            _ => Err(ConfigError::InvalidValue("SANDBOX_BACKEND".to_string())),
        }
    }
}

/// Sandbox resource configuration
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    pub backend: SandboxBackend,
    pub docker_socket: Option<String>,
    /// Default time limit per test case in milliseconds
    pub default_time_limit_ms: u64,
    /// Memory limit in megabytes
    pub memory_limit_mb: u64,
    /// Interpreter binaries for the process backend
    pub node_binary: String,
    pub python_binary: String,
}

/// Grading pipeline configuration
#[derive(Debug, Clone)]
pub struct GradingConfig {
    /// Test cases executed concurrently for one submission
    pub max_parallel_cases: usize,
    /// Accept reference/validation code from clients on ad-hoc runs
    pub allow_client_judge_code: bool,
    /// Wall-clock budget for grading one submission
    pub budget_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            sandbox: SandboxConfig::from_env()?,
            grading: GradingConfig::from_env()?,
        })
    }
}

/// Read and parse an optional variable, falling back to `default`
fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

impl SandboxConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let default_time_limit_ms = parse_or("DEFAULT_TIME_LIMIT_MS", DEFAULT_TIME_LIMIT_MS)?;
        if !(MIN_TIME_LIMIT_MS..=MAX_TIME_LIMIT_MS).contains(&default_time_limit_ms) {
            return Err(ConfigError::InvalidValue("DEFAULT_TIME_LIMIT_MS".to_string()));
        }

        Ok(Self {
            backend: parse_or("SANDBOX_BACKEND", SandboxBackend::Docker)?,
            docker_socket: env::var("DOCKER_SOCKET").ok(),
            default_time_limit_ms,
            memory_limit_mb: parse_or("SANDBOX_MEMORY_LIMIT_MB", DEFAULT_MEMORY_LIMIT_MB)?,
            node_binary: env::var("NODE_BINARY").unwrap_or_else(|_| "node".to_string()),
            python_binary: env::var("PYTHON_BINARY").unwrap_or_else(|_| "python3".to_string()),
        })
    }
}

impl GradingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_parallel_cases = parse_or("MAX_PARALLEL_CASES", DEFAULT_MAX_PARALLEL_CASES)?;
        if max_parallel_cases == 0 {
            return Err(ConfigError::InvalidValue("MAX_PARALLEL_CASES".to_string()));
        }

        Ok(Self {
            max_parallel_cases,
            allow_client_judge_code: parse_or("ALLOW_CLIENT_JUDGE_CODE", false)?,
            budget_ms: parse_or("GRADING_BUDGET_MS", DEFAULT_GRADING_BUDGET_MS)?,
        })
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            backend: SandboxBackend::Process,
            docker_socket: None,
            default_time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            memory_limit_mb: DEFAULT_MEMORY_LIMIT_MB,
            node_binary: "node".to_string(),
            python_binary: "python3".to_string(),
        }
    }
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            max_parallel_cases: DEFAULT_MAX_PARALLEL_CASES,
            allow_client_judge_code: false,
            budget_ms: DEFAULT_GRADING_BUDGET_MS,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
