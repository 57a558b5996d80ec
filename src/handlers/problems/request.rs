//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{
    MAX_MEMORY_LIMIT_KB, MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH,
    MAX_TEST_CASE_INPUT_SIZE, MAX_TEST_CASE_OUTPUT_SIZE, MAX_TIME_LIMIT_MS,
};
use crate::models::Difficulty;

/// Create problem request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: String,

    pub difficulty: Difficulty,

    /// Per-test-case time limit in milliseconds
    #[validate(range(min = 1, max = MAX_TIME_LIMIT_MS))]
    pub time_limit_ms: Option<u64>,

    /// Per-test-case memory limit in kilobytes
    #[validate(range(min = 1024, max = MAX_MEMORY_LIMIT_KB))]
    pub memory_limit_kb: Option<u64>,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Create test case request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestCaseRequest {
    #[validate(length(max = MAX_TEST_CASE_INPUT_SIZE))]
    pub input: String,

    #[validate(length(max = MAX_TEST_CASE_OUTPUT_SIZE))]
    pub expected_output: String,

    /// Example cases are visible to end users; others stay hidden
    #[serde(default)]
    pub is_example: bool,
}
