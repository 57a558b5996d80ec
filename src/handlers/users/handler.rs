//! User handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, models::User, state::AppState};

use super::{
    request::CreateUserRequest,
    response::{ProblemProgressResponse, UserProgressResponse, UserResponse},
};

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    let user = state
        .store()
        .add_user(User::new(payload.username, payload.email))
        .await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.store().get_user(id).await?;
    Ok(Json(user.into()))
}

/// Get a user's per-problem progress
pub async fn get_user_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserProgressResponse>> {
    let statuses = state.store().statuses_for_user(id).await?;

    let solved_count = statuses.iter().filter(|s| s.solved).count();
    let problems: Vec<ProblemProgressResponse> =
        statuses.into_iter().map(Into::into).collect();

    Ok(Json(UserProgressResponse {
        user_id: id,
        problems,
        solved_count,
    }))
}
