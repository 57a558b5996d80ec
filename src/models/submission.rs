//! Submission and test result models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Language;

/// Submission model
///
/// Created once per user action, mutated only by the evaluation pipeline,
/// never deleted. `runtime_ms` and `memory_kb` are the maxima observed across
/// the test cases of the most recent evaluation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language: Language,
    #[serde(skip_serializing)]
    pub source_code: String,
    pub status: SubmissionStatus,
    pub runtime_ms: u64,
    pub memory_kb: u64,
    pub created_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Create a new pending submission
    pub fn new(user_id: Uuid, problem_id: Uuid, language: Language, source_code: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            language,
            source_code,
            status: SubmissionStatus::Pending,
            runtime_ms: 0,
            memory_kb: 0,
            created_at: now,
            submitted_at: now,
        }
    }
}

/// Submission lifecycle status
///
/// `Pending → Testing → {Accepted, Failed}`; `InternalError` marks an
/// evaluation that died after entering `Testing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Testing,
    Accepted,
    Failed,
    InternalError,
}

impl SubmissionStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Testing => "testing",
            Self::Accepted => "accepted",
            Self::Failed => "failed",
            Self::InternalError => "internal_error",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "testing" => Some(Self::Testing),
            "accepted" => Some(Self::Accepted),
            "failed" => Some(Self::Failed),
            "internal_error" => Some(Self::InternalError),
            _ => None,
        }
    }

    /// Check if this is a terminal status (evaluation complete)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Testing)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-test-case verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    CompileError,
    RuntimeError,
    TimeExceeded,
    InternalError,
}

impl Verdict {
    /// Get verdict as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::WrongAnswer => "wrong_answer",
            Self::CompileError => "compile_error",
            Self::RuntimeError => "runtime_error",
            Self::TimeExceeded => "time_exceeded",
            Self::InternalError => "internal_error",
        }
    }

    /// Parse verdict from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "accepted" => Some(Self::Accepted),
            "wrong_answer" => Some(Self::WrongAnswer),
            "compile_error" => Some(Self::CompileError),
            "runtime_error" => Some(Self::RuntimeError),
            "time_exceeded" => Some(Self::TimeExceeded),
            "internal_error" => Some(Self::InternalError),
            _ => None,
        }
    }

    /// Check if this verdict means the case passed
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running one test case for one submission
///
/// Appended per (submission, test case) pair during an evaluation and never
/// updated in place; a re-evaluation appends a fresh set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub test_case_id: Uuid,
    pub status: Verdict,
    pub output: String,
    pub runtime_ms: u64,
    pub memory_kb: u64,
    pub created_at: DateTime<Utc>,
}

impl TestResult {
    /// Create a new result row for a case
    pub fn new(
        submission_id: Uuid,
        test_case_id: Uuid,
        status: Verdict,
        output: String,
        runtime_ms: u64,
        memory_kb: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            submission_id,
            test_case_id,
            status,
            output,
            runtime_ms,
            memory_kb,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Testing,
            SubmissionStatus::Accepted,
            SubmissionStatus::Failed,
            SubmissionStatus::InternalError,
        ] {
            assert_eq!(SubmissionStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(SubmissionStatus::from_str("unknown"), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!SubmissionStatus::Pending.is_terminal());
        assert!(!SubmissionStatus::Testing.is_terminal());
        assert!(SubmissionStatus::Accepted.is_terminal());
        assert!(SubmissionStatus::Failed.is_terminal());
        assert!(SubmissionStatus::InternalError.is_terminal());
    }

    #[test]
    fn test_verdict_round_trip() {
        for verdict in [
            Verdict::Accepted,
            Verdict::WrongAnswer,
            Verdict::CompileError,
            Verdict::RuntimeError,
            Verdict::TimeExceeded,
            Verdict::InternalError,
        ] {
            assert_eq!(Verdict::from_str(verdict.as_str()), Some(verdict));
        }
        assert!(Verdict::Accepted.is_accepted());
        assert!(!Verdict::WrongAnswer.is_accepted());
    }
}
