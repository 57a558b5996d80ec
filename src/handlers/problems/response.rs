//! Problem response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Difficulty, Problem, TestCase};

/// Problem response
#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub time_limit_ms: u64,
    pub memory_limit_kb: u64,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Problem> for ProblemResponse {
    fn from(problem: Problem) -> Self {
        Self {
            id: problem.id,
            title: problem.title,
            description: problem.description,
            difficulty: problem.difficulty,
            time_limit_ms: problem.time_limit_ms,
            memory_limit_kb: problem.memory_limit_kb,
            tags: problem.tags,
            created_at: problem.created_at,
        }
    }
}

/// Problem list response
#[derive(Debug, Serialize)]
pub struct ProblemsListResponse {
    pub problems: Vec<ProblemResponse>,
    pub total: usize,
}

/// Test case response
#[derive(Debug, Serialize)]
pub struct TestCaseResponse {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub input: String,
    pub expected_output: String,
    pub is_example: bool,
    pub created_at: DateTime<Utc>,
}

impl From<TestCase> for TestCaseResponse {
    fn from(case: TestCase) -> Self {
        Self {
            id: case.id,
            problem_id: case.problem_id,
            input: case.input,
            expected_output: case.expected_output,
            is_example: case.is_example,
            created_at: case.created_at,
        }
    }
}

/// Test case list response
#[derive(Debug, Serialize)]
pub struct TestCasesListResponse {
    pub test_cases: Vec<TestCaseResponse>,
    pub total: usize,
}
