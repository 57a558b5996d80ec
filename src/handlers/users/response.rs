//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{User, UserProblemStatus};

/// User profile response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Per-problem progress entry
#[derive(Debug, Serialize)]
pub struct ProblemProgressResponse {
    pub problem_id: Uuid,
    pub attempted: bool,
    pub solved: bool,
    pub failed_attempts: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub first_solved_at: Option<DateTime<Utc>>,
}

impl From<UserProblemStatus> for ProblemProgressResponse {
    fn from(status: UserProblemStatus) -> Self {
        Self {
            problem_id: status.problem_id,
            attempted: status.attempted,
            solved: status.solved,
            failed_attempts: status.failed_attempts,
            last_attempt_at: status.last_attempt_at,
            first_solved_at: status.first_solved_at,
        }
    }
}

/// User progress response
#[derive(Debug, Serialize)]
pub struct UserProgressResponse {
    pub user_id: Uuid,
    pub problems: Vec<ProblemProgressResponse>,
    pub solved_count: usize,
}
