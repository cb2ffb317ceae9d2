//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds (covers a full grading run)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Maximum request body size in bytes
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// SANDBOX DEFAULTS
// =============================================================================

/// Default per-case time limit in milliseconds
pub const DEFAULT_TIME_LIMIT_MS: u64 = 2_000;

/// Maximum per-case time limit in milliseconds (to prevent abuse)
pub const MAX_TIME_LIMIT_MS: u64 = 10_000;

/// Minimum per-case time limit in milliseconds
pub const MIN_TIME_LIMIT_MS: u64 = 100;

/// Grace period added to the host-side timeout on top of the case limit
pub const HOST_TIMEOUT_GRACE_MS: u64 = 1_500;

/// Extra host-side budget for creating, starting and removing a sandbox
pub const SANDBOX_SETUP_ALLOWANCE_MS: u64 = 20_000;

/// Default memory limit in megabytes
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 128;

/// CPU limit per container (number of cores)
pub const CPU_LIMIT: f64 = 0.5;

/// Maximum processes inside a sandbox container
pub const SANDBOX_PIDS_LIMIT: i64 = 32;

/// Maximum bytes of stdout captured from one execution
pub const MAX_CAPTURED_OUTPUT_BYTES: usize = 64 * 1024;

/// Default number of test cases executed concurrently for one submission
pub const DEFAULT_MAX_PARALLEL_CASES: usize = 4;

/// Default wall-clock budget for grading one submission, reference and
/// validation runs included; kept below the request timeout
pub const DEFAULT_GRADING_BUDGET_MS: u64 = 90_000;

/// Headroom between the grading budget and the request timeout
pub const REQUEST_TIMEOUT_HEADROOM_SECS: u64 = 10;

/// Marker prefix the harness writes before its JSON verdict line
pub const HARNESS_RESULT_MARKER: &str = "__CODEQUEST_RESULT__";

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers
pub mod languages {
    pub const JAVASCRIPT: &str = "javascript";
    pub const PYTHON: &str = "python";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[JAVASCRIPT, PYTHON];
}

/// Container images for each language
pub mod container_images {
    pub const JAVASCRIPT: &str = "node:20-alpine";
    pub const PYTHON: &str = "python:3.12-alpine";
}

// =============================================================================
// TICKETS
// =============================================================================

/// Ticket difficulty identifiers
pub mod difficulties {
    pub const EASY: &str = "easy";
    pub const MEDIUM: &str = "medium";
    pub const HARD: &str = "hard";

    pub const ALL: &[&str] = &[EASY, MEDIUM, HARD];
}

/// Maximum ticket title length
pub const MAX_TICKET_TITLE_LENGTH: u64 = 256;

/// Maximum ticket description length
pub const MAX_TICKET_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum number of test cases per ticket or ad-hoc run
pub const MAX_TEST_CASES: usize = 100;

/// Maximum source code size in bytes (64 KB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 64 * 1024;

/// Maximum characters of an output preview returned to clients
pub const OUTPUT_PREVIEW_CHARS: usize = 1_000;

// =============================================================================
// PROGRESSION
// =============================================================================

/// XP awarded for a first completion, by difficulty
pub mod xp_rewards {
    pub const EASY: i64 = 10;
    pub const MEDIUM: i64 = 25;
    pub const HARD: i64 = 50;
}

/// Streak milestones, in days
pub const STREAK_MILESTONES: &[i32] = &[3, 7, 14, 30, 60, 100, 180, 365];

/// Default number of leaderboard entries returned
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 100;

/// Maximum number of leaderboard entries returned
pub const MAX_LEADERBOARD_LIMIT: i64 = 500;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const PLAYER: &str = "player";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Grading endpoint - max requests
    pub const GRADING_MAX_REQUESTS: i64 = 10;
    /// Grading endpoint - window in seconds
    pub const GRADING_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
