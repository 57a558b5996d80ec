//! User management handlers

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

/// User routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_user))
        .route("/{id}", get(handler::get_user))
        .route("/{id}/progress", get(handler::get_user_progress))
}
