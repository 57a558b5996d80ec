//! Problem management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_problems))
        .route("/", post(handler::create_problem))
        .route("/{id}", get(handler::get_problem))
        // Test cases
        .route("/{id}/test-cases", get(handler::list_example_test_cases))
        .route("/{id}/test-cases", post(handler::add_test_case))
}
