//! Test case model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Test case model
///
/// Immutable after creation. Example cases are visible to end users;
/// non-example cases are hidden grading data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub input: String,
    pub expected_output: String,
    pub is_example: bool,
    pub created_at: DateTime<Utc>,
}

impl TestCase {
    /// Create a new test case with a fresh id
    pub fn new(problem_id: Uuid, input: String, expected_output: String, is_example: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            problem_id,
            input,
            expected_output,
            is_example,
            created_at: Utc::now(),
        }
    }
}
