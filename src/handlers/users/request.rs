//! User request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_USERNAME_LENGTH, MIN_USERNAME_LENGTH};

/// Register user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = MIN_USERNAME_LENGTH, max = MAX_USERNAME_LENGTH))]
    pub username: String,

    #[validate(email)]
    pub email: String,
}
