//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_SOURCE_CODE_SIZE;

/// Create submission request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    pub user_id: Uuid,

    pub problem_id: Uuid,

    /// Language identifier (`c`, `cpp`, `python`)
    pub language: String,

    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub source_code: String,
}
