//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Language, Submission, SubmissionStatus, TestResult, Verdict};

/// Acknowledgement for a freshly queued submission
#[derive(Debug, Serialize)]
pub struct SubmissionAcceptedResponse {
    pub submission_id: Uuid,
    pub status: SubmissionStatus,
}

/// Submission response (without source code)
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language: Language,
    pub status: SubmissionStatus,
    /// Peak runtime across the test cases of the latest pass, in ms
    pub runtime_ms: u64,
    /// Peak memory across the test cases of the latest pass, in KB
    pub memory_kb: u64,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id,
            user_id: submission.user_id,
            problem_id: submission.problem_id,
            language: submission.language,
            status: submission.status,
            runtime_ms: submission.runtime_ms,
            memory_kb: submission.memory_kb,
            submitted_at: submission.submitted_at,
        }
    }
}

/// Per-case result response
#[derive(Debug, Serialize)]
pub struct TestResultResponse {
    pub id: Uuid,
    pub test_case_id: Uuid,
    pub status: Verdict,
    pub output: String,
    pub runtime_ms: u64,
    pub memory_kb: u64,
    pub created_at: DateTime<Utc>,
}

impl From<TestResult> for TestResultResponse {
    fn from(result: TestResult) -> Self {
        Self {
            id: result.id,
            test_case_id: result.test_case_id,
            status: result.status,
            output: result.output,
            runtime_ms: result.runtime_ms,
            memory_kb: result.memory_kb,
            created_at: result.created_at,
        }
    }
}

/// Submission plus its full per-case result history
#[derive(Debug, Serialize)]
pub struct SubmissionResultsResponse {
    pub submission: SubmissionResponse,
    pub results: Vec<TestResultResponse>,
    pub total: usize,
}
