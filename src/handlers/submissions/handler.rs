//! Submission handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Language, Submission},
    state::AppState,
};

use super::{
    request::CreateSubmissionRequest,
    response::{SubmissionAcceptedResponse, SubmissionResponse, SubmissionResultsResponse},
};

/// Submit a solution for evaluation
///
/// Persists a `Pending` submission, queues it on the dispatcher, and
/// acknowledges immediately; the verdict is produced asynchronously and
/// observed by polling.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<SubmissionAcceptedResponse>)> {
    payload.validate()?;

    let language = Language::from_str(&payload.language).ok_or_else(|| {
        AppError::InvalidInput(format!("Unsupported language: {}", payload.language))
    })?;

    let submission = state
        .store()
        .add_submission(Submission::new(
            payload.user_id,
            payload.problem_id,
            language,
            payload.source_code,
        ))
        .await?;

    state.dispatcher().dispatch(submission.id)?;

    tracing::info!(
        "Accepted submission {} for problem {} by user {}",
        submission.id,
        submission.problem_id,
        submission.user_id
    );
    Ok((
        StatusCode::ACCEPTED,
        Json(SubmissionAcceptedResponse {
            submission_id: submission.id,
            status: submission.status,
        }),
    ))
}

/// Get a submission by id
pub async fn get_submission(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = state.store().get_submission(id).await?;
    Ok(Json(submission.into()))
}

/// Get a submission together with its per-case result history
pub async fn get_submission_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResultsResponse>> {
    let submission = state.store().get_submission(id).await?;
    let results = state.store().results_for_submission(id).await?;

    let total = results.len();
    Ok(Json(SubmissionResultsResponse {
        submission: submission.into(),
        results: results.into_iter().map(Into::into).collect(),
        total,
    }))
}
