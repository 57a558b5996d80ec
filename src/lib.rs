//! CodeJudge - Submission Evaluation Pipeline
//!
//! This library provides the core functionality for CodeJudge, an online
//! judge that compiles user-submitted programs, runs them against per-problem
//! test cases under resource limits, and records verdicts.
//!
//! # Architecture
//!
//! The pipeline is built from small, independently testable components:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Judge**: the evaluation orchestrator, comparator and dispatcher
//! - **Sandbox**: process-based compile-and-run execution backend
//! - **Store**: persistence for users, problems, submissions and results
//! - **Models**: domain models and verdict vocabulary
//!
//! A submission enters through `POST /submissions`, is queued on the
//! dispatcher, evaluated case by case by the judge, and its verdict is
//! observed by polling `GET /submissions/{id}`.

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod models;
pub mod sandbox;
pub mod seed;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
