#![allow(dead_code)]

//! Shared helpers for integration tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

use codejudge::handlers;
use codejudge::judge::{Judge, dispatcher::Dispatcher};
use codejudge::models::{Difficulty, Language, Problem, Submission, TestCase, User};
use codejudge::sandbox::{
    ExecutionBackend, ExecutionOutcome, ExecutionStatus, Prepared, PreparedProgram, ResourceLimits,
};
use codejudge::state::AppState;
use codejudge::store::{MemoryStore, Store};

/// Execution backend whose prepared program answers each test case input
/// with a scripted outcome
///
/// Every submission behaves the same way; use [`SourceScriptedBackend`]
/// when different submissions must produce different outcomes.
pub struct ScriptedBackend {
    outcomes: HashMap<String, ExecutionOutcome>,
}

impl ScriptedBackend {
    pub fn new(outcomes: &[(&str, ExecutionOutcome)]) -> Self {
        Self {
            outcomes: outcomes
                .iter()
                .map(|(input, outcome)| (input.to_string(), outcome.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl ExecutionBackend for ScriptedBackend {
    async fn prepare(
        &self,
        _source: &str,
        _language: Language,
        _limits: ResourceLimits,
    ) -> anyhow::Result<Prepared> {
        Ok(Prepared::Ready(Box::new(ScriptedProgram {
            outcomes: self.outcomes.clone(),
        })))
    }
}

struct ScriptedProgram {
    outcomes: HashMap<String, ExecutionOutcome>,
}

#[async_trait]
impl PreparedProgram for ScriptedProgram {
    async fn run(&self, input: &str) -> anyhow::Result<ExecutionOutcome> {
        self.outcomes
            .get(input)
            .cloned()
            .ok_or_else(|| anyhow!("no scripted outcome for input {:?}", input))
    }
}

/// Execution backend that scripts one outcome per submission source,
/// replayed for every test case
///
/// Preparing a source with no scripted outcome fails, which exercises the
/// pipeline's infrastructure-error path.
pub struct SourceScriptedBackend {
    outcomes: HashMap<String, ExecutionOutcome>,
}

impl SourceScriptedBackend {
    pub fn new(outcomes: &[(&str, ExecutionOutcome)]) -> Self {
        Self {
            outcomes: outcomes
                .iter()
                .map(|(source, outcome)| (source.to_string(), outcome.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl ExecutionBackend for SourceScriptedBackend {
    async fn prepare(
        &self,
        source: &str,
        _language: Language,
        _limits: ResourceLimits,
    ) -> anyhow::Result<Prepared> {
        let outcome = self
            .outcomes
            .get(source)
            .cloned()
            .ok_or_else(|| anyhow!("no scripted program for source {:?}", source))?;
        Ok(Prepared::Ready(Box::new(FixedProgram { outcome })))
    }
}

struct FixedProgram {
    outcome: ExecutionOutcome,
}

#[async_trait]
impl PreparedProgram for FixedProgram {
    async fn run(&self, _input: &str) -> anyhow::Result<ExecutionOutcome> {
        Ok(self.outcome.clone())
    }
}

/// Successful execution producing `stdout`
pub fn success(stdout: &str, runtime_ms: u64, memory_kb: u64) -> ExecutionOutcome {
    ExecutionOutcome {
        status: ExecutionStatus::Success,
        stdout: stdout.to_string(),
        stderr: String::new(),
        runtime_ms,
        memory_kb,
        exit_code: Some(0),
    }
}

/// Wire a full application router over an in-memory store and the given
/// backend, the way `main` wires it
pub fn test_app(backend: impl ExecutionBackend + 'static) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let judge = Arc::new(Judge::new(store.clone(), Arc::new(backend)));
    let dispatcher = Dispatcher::new(judge, 2, 64);
    let state = AppState::new(store.clone(), dispatcher);

    let app = Router::new()
        .nest("/api/v1", handlers::routes())
        .with_state(state);
    (app, store)
}

pub async fn seed_user(store: &MemoryStore, username: &str) -> User {
    store
        .add_user(User::new(
            username.to_string(),
            format!("{}@example.com", username),
        ))
        .await
        .expect("user should insert")
}

/// Seed a problem with the given (input, expected) hidden cases
pub async fn seed_problem(
    store: &MemoryStore,
    title: &str,
    time_limit_ms: u64,
    cases: &[(&str, &str)],
) -> (Problem, Vec<TestCase>) {
    let problem = store
        .add_problem(Problem::new(
            title.to_string(),
            "Read stdin, write the answer to stdout".to_string(),
            Difficulty::Easy,
            time_limit_ms,
            256_000,
            vec!["test".to_string()],
        ))
        .await
        .expect("problem should insert");

    let mut stored = Vec::new();
    for (input, expected) in cases {
        let case = store
            .add_test_case(TestCase::new(
                problem.id,
                input.to_string(),
                expected.to_string(),
                false,
            ))
            .await
            .expect("test case should insert");
        stored.push(case);
    }
    (problem, stored)
}

/// Persist a pending submission for (user, problem)
pub async fn seed_submission(
    store: &MemoryStore,
    user: &User,
    problem: &Problem,
    source: &str,
) -> Submission {
    store
        .add_submission(Submission::new(
            user.id,
            problem.id,
            Language::Cpp,
            source.to_string(),
        ))
        .await
        .expect("submission should insert")
}

/// Poll the store until every listed submission reaches a terminal status
pub async fn wait_until_terminal(store: &MemoryStore, ids: &[Uuid]) -> Vec<Submission> {
    for _ in 0..200 {
        let mut submissions = Vec::with_capacity(ids.len());
        for id in ids {
            let submission = store
                .get_submission(*id)
                .await
                .expect("submission should exist");
            submissions.push(submission);
        }
        if submissions.iter().all(|s| s.status.is_terminal()) {
            return submissions;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("submissions did not reach a terminal status in time");
}
