//! Problem handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_MEMORY_LIMIT_KB, DEFAULT_TIME_LIMIT_MS},
    error::AppResult,
    models::{Problem, TestCase},
    state::AppState,
};

use super::{
    request::{CreateProblemRequest, CreateTestCaseRequest},
    response::{ProblemResponse, ProblemsListResponse, TestCaseResponse, TestCasesListResponse},
};

/// List all problems
pub async fn list_problems(
    State(state): State<AppState>,
) -> AppResult<Json<ProblemsListResponse>> {
    let problems = state.store().list_problems().await?;

    let total = problems.len();
    let problems: Vec<ProblemResponse> = problems.into_iter().map(Into::into).collect();

    Ok(Json(ProblemsListResponse { problems, total }))
}

/// Create a new problem
pub async fn create_problem(
    State(state): State<AppState>,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<ProblemResponse>)> {
    payload.validate()?;

    let problem = state
        .store()
        .add_problem(Problem::new(
            payload.title,
            payload.description,
            payload.difficulty,
            payload.time_limit_ms.unwrap_or(DEFAULT_TIME_LIMIT_MS),
            payload.memory_limit_kb.unwrap_or(DEFAULT_MEMORY_LIMIT_KB),
            payload.tags,
        ))
        .await?;

    tracing::info!("Created problem {} ({})", problem.title, problem.id);
    Ok((StatusCode::CREATED, Json(problem.into())))
}

/// Get a specific problem
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProblemResponse>> {
    let problem = state.store().get_problem(id).await?;
    Ok(Json(problem.into()))
}

/// Add a test case to a problem
pub async fn add_test_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateTestCaseRequest>,
) -> AppResult<(StatusCode, Json<TestCaseResponse>)> {
    payload.validate()?;

    let case = state
        .store()
        .add_test_case(TestCase::new(
            id,
            payload.input,
            payload.expected_output,
            payload.is_example,
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(case.into())))
}

/// List a problem's example test cases
///
/// Hidden grading cases are never exposed through the API.
pub async fn list_example_test_cases(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TestCasesListResponse>> {
    let cases = state.store().test_cases_for_problem(id).await?;

    let test_cases: Vec<TestCaseResponse> = cases
        .into_iter()
        .filter(|c| c.is_example)
        .map(Into::into)
        .collect();
    let total = test_cases.len();

    Ok(Json(TestCasesListResponse { test_cases, total }))
}
