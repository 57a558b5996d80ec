//! End-to-end pipeline tests
//!
//! Store, judge and dispatcher wired together the way `main` wires them,
//! with a scripted execution backend standing in for the sandbox.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use codejudge::judge::{Judge, dispatcher::Dispatcher};
use codejudge::models::{SubmissionStatus, Verdict};
use codejudge::store::{MemoryStore, Store};

use common::{
    ScriptedBackend, SourceScriptedBackend, seed_problem, seed_submission, seed_user, success,
    wait_until_terminal,
};

#[tokio::test]
async fn concurrent_evaluations_stay_isolated() {
    let store = Arc::new(MemoryStore::new());
    let user = seed_user(&store, "alice").await;
    let (sums, sum_cases) =
        seed_problem(&store, "Sum", 500, &[("1 2\n", "3\n"), ("2 3\n", "5\n")]).await;
    let (doubles, double_cases) = seed_problem(&store, "Double", 500, &[("5\n", "10\n")]).await;

    // Sum submissions pass both cases; Double submissions print 11 where
    // 10 is expected.
    let backend = ScriptedBackend::new(&[
        ("1 2\n", success("3\n", 10, 1_200)),
        ("2 3\n", success("5\n", 12, 1_100)),
        ("5\n", success("11\n", 9, 1_000)),
    ]);
    let judge = Arc::new(Judge::new(store.clone(), Arc::new(backend)));
    let dispatcher = Dispatcher::new(judge, 3, 64);

    let mut sum_ids = Vec::new();
    let mut double_ids = Vec::new();
    for _ in 0..3 {
        let submission = seed_submission(&store, &user, &sums, "print(a + b)").await;
        dispatcher
            .dispatch(submission.id)
            .expect("dispatch should succeed");
        sum_ids.push(submission.id);

        let submission = seed_submission(&store, &user, &doubles, "print(n + n + 1)").await;
        dispatcher
            .dispatch(submission.id)
            .expect("dispatch should succeed");
        double_ids.push(submission.id);
    }

    let all_ids: Vec<Uuid> = sum_ids.iter().chain(double_ids.iter()).copied().collect();
    let submissions = wait_until_terminal(&store, &all_ids).await;

    let sum_case_ids: HashSet<Uuid> = sum_cases.iter().map(|c| c.id).collect();
    let double_case_ids: HashSet<Uuid> = double_cases.iter().map(|c| c.id).collect();

    // Every result row must belong to its own submission and reference a
    // case of that submission's problem, no matter how the workers
    // interleaved.
    for submission in &submissions {
        let is_sum = sum_ids.contains(&submission.id);
        let (own_cases, status, verdict) = if is_sum {
            (&sum_case_ids, SubmissionStatus::Accepted, Verdict::Accepted)
        } else {
            (
                &double_case_ids,
                SubmissionStatus::Failed,
                Verdict::WrongAnswer,
            )
        };
        assert_eq!(submission.status, status);

        let results = store
            .results_for_submission(submission.id)
            .await
            .expect("results should load");
        assert_eq!(results.len(), own_cases.len());
        for result in &results {
            assert_eq!(result.submission_id, submission.id);
            assert!(own_cases.contains(&result.test_case_id));
            assert_eq!(result.status, verdict);
        }
    }

    let progress = store
        .user_problem_status(user.id, sums.id)
        .await
        .expect("progress should load");
    assert!(progress.solved);
    assert!(progress.first_solved_at.is_some());
}

#[tokio::test]
async fn solving_then_failing_keeps_progress_monotone() {
    let store = Arc::new(MemoryStore::new());
    let user = seed_user(&store, "bob").await;
    let (problem, _cases) = seed_problem(&store, "Sum", 500, &[("1 2\n", "3\n")]).await;

    let backend = SourceScriptedBackend::new(&[
        ("print(a + b)", success("3\n", 8, 900)),
        ("print(a - b)", success("-1\n", 8, 900)),
    ]);
    let judge = Arc::new(Judge::new(store.clone(), Arc::new(backend)));
    let dispatcher = Dispatcher::new(judge, 1, 8);

    let solve = seed_submission(&store, &user, &problem, "print(a + b)").await;
    dispatcher
        .dispatch(solve.id)
        .expect("dispatch should succeed");
    let solved = wait_until_terminal(&store, &[solve.id]).await;
    assert_eq!(solved[0].status, SubmissionStatus::Accepted);

    let progress = store
        .user_problem_status(user.id, problem.id)
        .await
        .expect("progress should load");
    assert!(progress.solved);
    assert_eq!(progress.failed_attempts, 0);
    let first_solved_at = progress
        .first_solved_at
        .expect("solve time should be recorded");

    let fail = seed_submission(&store, &user, &problem, "print(a - b)").await;
    dispatcher
        .dispatch(fail.id)
        .expect("dispatch should succeed");
    let failed = wait_until_terminal(&store, &[fail.id]).await;
    assert_eq!(failed[0].status, SubmissionStatus::Failed);

    let progress = store
        .user_problem_status(user.id, problem.id)
        .await
        .expect("progress should load");
    assert!(
        progress.solved,
        "a later failed attempt must not clear solved"
    );
    assert_eq!(progress.first_solved_at, Some(first_solved_at));
    assert_eq!(progress.failed_attempts, 1);
}

#[tokio::test]
async fn infrastructure_failure_is_not_charged_to_the_user() {
    let store = Arc::new(MemoryStore::new());
    let user = seed_user(&store, "carol").await;
    let (problem, cases) =
        seed_problem(&store, "Sum", 500, &[("1 2\n", "3\n"), ("2 3\n", "5\n")]).await;

    // No scripted sources at all, so every prepare call fails like a
    // broken toolchain would.
    let backend = SourceScriptedBackend::new(&[]);
    let judge = Arc::new(Judge::new(store.clone(), Arc::new(backend)));
    let dispatcher = Dispatcher::new(judge, 1, 8);

    let submission = seed_submission(&store, &user, &problem, "print(a + b)").await;
    dispatcher
        .dispatch(submission.id)
        .expect("dispatch should succeed");
    let evaluated = wait_until_terminal(&store, &[submission.id]).await;
    assert_eq!(evaluated[0].status, SubmissionStatus::InternalError);

    let results = store
        .results_for_submission(submission.id)
        .await
        .expect("results should load");
    assert_eq!(results.len(), cases.len());
    for result in &results {
        assert_eq!(result.status, Verdict::InternalError);
        assert!(result.output.starts_with("Internal error:"));
    }

    // The attempt is on record, but an infrastructure failure is neither a
    // solve nor a failed attempt.
    let progress = store
        .user_problem_status(user.id, problem.id)
        .await
        .expect("progress should load");
    assert!(progress.attempted);
    assert!(!progress.solved);
    assert_eq!(progress.failed_attempts, 0);
}
