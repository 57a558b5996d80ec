//! Problem model

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Problem model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Per-test-case wall-clock limit in milliseconds
    pub time_limit_ms: u64,
    /// Per-test-case memory ceiling in kilobytes
    pub memory_limit_kb: u64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Create a new problem with a fresh id
    pub fn new(
        title: String,
        description: String,
        difficulty: Difficulty,
        time_limit_ms: u64,
        memory_limit_kb: u64,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            difficulty,
            time_limit_ms,
            memory_limit_kb,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the time limit as a duration
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Get memory limit in megabytes
    pub fn memory_limit_mb(&self) -> u64 {
        self.memory_limit_kb / 1024
    }
}

/// Problem difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}
