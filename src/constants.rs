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
pub const DEFAULT_SERVER_PORT: u16 = 8089;

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default number of concurrent evaluation workers
pub const DEFAULT_JUDGE_WORKERS: usize = 4;

/// Default capacity of the pending-evaluation queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

// =============================================================================
// SANDBOX DEFAULTS
// =============================================================================

/// Default per-problem time limit in milliseconds
pub const DEFAULT_TIME_LIMIT_MS: u64 = 2_000;

/// Default per-problem memory limit in kilobytes (256 MB)
pub const DEFAULT_MEMORY_LIMIT_KB: u64 = 256_000;

/// Maximum configurable time limit in milliseconds (to prevent abuse)
pub const MAX_TIME_LIMIT_MS: u64 = 30_000;

/// Maximum configurable memory limit in kilobytes (1 GB)
pub const MAX_MEMORY_LIMIT_KB: u64 = 1_024_000;

/// Default wall-clock bound for a single compile in milliseconds
pub const DEFAULT_COMPILE_TIMEOUT_MS: u64 = 10_000;

/// Default cap on captured stdout/stderr per execution in bytes (4 MB)
pub const DEFAULT_OUTPUT_LIMIT_BYTES: usize = 4 * 1024 * 1024;

/// Interval between resident-memory samples of a running program
pub const MEMORY_SAMPLE_INTERVAL_MS: u64 = 20;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers
pub mod languages {
    pub const C: &str = "c";
    pub const CPP: &str = "cpp";
    pub const PYTHON: &str = "python";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[C, CPP, PYTHON];
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem description length
pub const MAX_PROBLEM_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum test case input size in bytes (10 MB)
pub const MAX_TEST_CASE_INPUT_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum test case output size in bytes (10 MB)
pub const MAX_TEST_CASE_OUTPUT_SIZE: u64 = 10 * 1024 * 1024;
