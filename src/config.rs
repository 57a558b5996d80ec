//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_COMPILE_TIMEOUT_MS, DEFAULT_JUDGE_WORKERS, DEFAULT_OUTPUT_LIMIT_BYTES,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MEMORY_SAMPLE_INTERVAL_MS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub judge: JudgeConfig,
    pub sandbox: SandboxConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Evaluation worker configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Number of concurrent evaluation workers
    pub workers: usize,
    /// Capacity of the pending-evaluation queue
    pub queue_capacity: usize,
}

/// Execution sandbox configuration
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Wall-clock bound for a single compile in milliseconds
    pub compile_timeout_ms: u64,
    /// Cap on captured stdout/stderr per execution in bytes
    pub output_limit_bytes: usize,
    /// Interval between resident-memory samples in milliseconds
    pub memory_sample_interval_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
            sandbox: SandboxConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            workers: env::var("JUDGE_WORKERS")
                .unwrap_or_else(|_| DEFAULT_JUDGE_WORKERS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_WORKERS".to_string()))?,
            queue_capacity: env::var("JUDGE_QUEUE_CAPACITY")
                .unwrap_or_else(|_| DEFAULT_QUEUE_CAPACITY.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_QUEUE_CAPACITY".to_string()))?,
        })
    }
}

impl SandboxConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            compile_timeout_ms: env::var("COMPILE_TIMEOUT_MS")
                .unwrap_or_else(|_| DEFAULT_COMPILE_TIMEOUT_MS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("COMPILE_TIMEOUT_MS".to_string()))?,
            output_limit_bytes: env::var("OUTPUT_LIMIT_BYTES")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_LIMIT_BYTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("OUTPUT_LIMIT_BYTES".to_string()))?,
            memory_sample_interval_ms: env::var("MEMORY_SAMPLE_INTERVAL_MS")
                .unwrap_or_else(|_| MEMORY_SAMPLE_INTERVAL_MS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MEMORY_SAMPLE_INTERVAL_MS".to_string()))?,
        })
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            compile_timeout_ms: DEFAULT_COMPILE_TIMEOUT_MS,
            output_limit_bytes: DEFAULT_OUTPUT_LIMIT_BYTES,
            memory_sample_interval_ms: MEMORY_SAMPLE_INTERVAL_MS,
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
