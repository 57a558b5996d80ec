//! Evaluation pipeline
//!
//! The [`Judge`] drives one submission through its full lifecycle: claim the
//! submission, load its problem and test cases, compile once, run every case
//! sequentially under the problem's limits, persist per-case results, and
//! fold everything into the submission's terminal status and the user's
//! per-problem progress.

pub mod comparator;
pub mod dispatcher;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Problem, Submission, SubmissionStatus, TestCase, TestResult, Verdict},
    sandbox::{
        ExecutionBackend, ExecutionOutcome, ExecutionStatus, Prepared, PreparedProgram,
        ResourceLimits,
    },
    store::{Store, StoreError},
};

/// Evaluation orchestrator
///
/// One `evaluate` call per submission runs at a time; the store enforces
/// this through an evaluation claim, so concurrent duplicate triggers
/// degrade to a logged no-op.
pub struct Judge {
    store: Arc<dyn Store>,
    backend: Arc<dyn ExecutionBackend>,
}

impl Judge {
    /// Create a judge over a store and an execution backend
    pub fn new(store: Arc<dyn Store>, backend: Arc<dyn ExecutionBackend>) -> Self {
        Self { store, backend }
    }

    /// Evaluate one submission end to end
    ///
    /// A missing submission, missing problem, or a problem with no test
    /// cases aborts before any state is written; the submission keeps its
    /// pre-call status. Once the submission has entered `Testing`, failures
    /// are absorbed into verdicts where possible and mark the submission
    /// `InternalError` where not.
    pub async fn evaluate(&self, submission_id: Uuid) -> AppResult<()> {
        let _claim = match self.store.begin_evaluation(submission_id).await {
            Ok(claim) => claim,
            Err(StoreError::EvaluationInProgress(_)) => {
                tracing::warn!("Submission {} is already being evaluated", submission_id);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Evaluating submission: {}", submission_id);

        // Load everything up front; a missing record aborts with no writes
        let submission = self.store.get_submission(submission_id).await?;
        let problem = self.store.get_problem(submission.problem_id).await?;
        let test_cases = self.store.test_cases_for_problem(problem.id).await?;
        if test_cases.is_empty() {
            return Err(AppError::NoTestCases(problem.id));
        }

        match self.run_evaluation(submission, &problem, &test_cases).await {
            Ok(status) => {
                tracing::info!("Submission {} evaluated: {}", submission_id, status);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Evaluation of submission {} failed: {}", submission_id, e);
                self.mark_internal_error(submission_id).await;
                Err(e)
            }
        }
    }

    /// Steps between the `Testing` transition and the final persist
    async fn run_evaluation(
        &self,
        mut submission: Submission,
        problem: &Problem,
        test_cases: &[TestCase],
    ) -> AppResult<SubmissionStatus> {
        // Visible to API pollers before the first case runs
        submission.status = SubmissionStatus::Testing;
        self.store.update_submission(submission.clone()).await?;

        let mut progress = self
            .store
            .user_problem_status(submission.user_id, submission.problem_id)
            .await?;
        progress.record_attempt(Utc::now());

        let limits = ResourceLimits {
            time_limit: problem.time_limit(),
            memory_limit_kb: problem.memory_limit_kb,
        };

        // Compile once, then run every case against the prepared program
        let summary = match self
            .backend
            .prepare(&submission.source_code, submission.language, limits)
            .await
        {
            Ok(Prepared::Ready(program)) => {
                self.run_test_cases(&submission, test_cases, program.as_ref())
                    .await
            }
            Ok(Prepared::CompileError(outcome)) => {
                self.record_uniform_failure(
                    &submission,
                    test_cases,
                    Verdict::CompileError,
                    outcome.stderr,
                    outcome.runtime_ms,
                )
                .await
            }
            Err(e) => {
                tracing::error!("Backend failed to prepare submission {}: {}", submission.id, e);
                self.record_uniform_failure(
                    &submission,
                    test_cases,
                    Verdict::InternalError,
                    format!("Internal error: {}", e),
                    0,
                )
                .await
            }
        };

        let status = summary.final_status();

        // The outcome lands on the user's progress exactly once per
        // evaluation; an infrastructure failure counts as neither a solve
        // nor a failed attempt
        match status {
            SubmissionStatus::Accepted => progress.record_outcome(true, Utc::now()),
            SubmissionStatus::Failed => progress.record_outcome(false, Utc::now()),
            _ => {}
        }
        if let Err(e) = self.store.update_user_problem_status(progress).await {
            tracing::error!(
                "Failed to update progress for submission {}: {}",
                submission.id,
                e
            );
        }

        submission.status = status;
        submission.runtime_ms = summary.max_runtime_ms;
        submission.memory_kb = summary.max_memory_kb;
        self.store.update_submission(submission).await?;

        Ok(status)
    }

    /// Run every test case in store order, persisting one result per case
    ///
    /// A backend failure on one case is recorded as that case's
    /// `InternalError` verdict and does not stop the remaining cases.
    async fn run_test_cases(
        &self,
        submission: &Submission,
        test_cases: &[TestCase],
        program: &dyn PreparedProgram,
    ) -> PassSummary {
        let mut summary = PassSummary::new();

        for case in test_cases {
            let result = match program.run(&case.input).await {
                Ok(outcome) => case_result(submission.id, case, outcome),
                Err(e) => {
                    tracing::error!(
                        "Backend failed on test case {} of submission {}: {}",
                        case.id,
                        submission.id,
                        e
                    );
                    TestResult::new(
                        submission.id,
                        case.id,
                        Verdict::InternalError,
                        format!("Internal error: {}", e),
                        0,
                        0,
                    )
                }
            };

            summary.fold(&result);
            if !self.record_case(result).await {
                summary.mark_write_failure();
            }
        }

        summary
    }

    /// Record the same verdict for every case of the pass
    ///
    /// Used when compilation fails or the backend cannot prepare the
    /// program at all, so the per-case history still covers every case.
    async fn record_uniform_failure(
        &self,
        submission: &Submission,
        test_cases: &[TestCase],
        verdict: Verdict,
        output: String,
        runtime_ms: u64,
    ) -> PassSummary {
        let mut summary = PassSummary::new();

        for case in test_cases {
            let result = TestResult::new(
                submission.id,
                case.id,
                verdict,
                output.clone(),
                runtime_ms,
                0,
            );
            summary.fold(&result);
            if !self.record_case(result).await {
                summary.mark_write_failure();
            }
        }

        summary
    }

    /// Persist one result row; a write failure is logged and reported back
    /// as a failed case, never as an aborted evaluation
    async fn record_case(&self, result: TestResult) -> bool {
        let submission_id = result.submission_id;
        if let Err(e) = self.store.add_test_result(result).await {
            tracing::error!(
                "Failed to store test result for submission {}: {}",
                submission_id,
                e
            );
            return false;
        }
        true
    }

    /// Best-effort terminal marker for evaluations that died after entering
    /// `Testing`
    async fn mark_internal_error(&self, submission_id: Uuid) {
        let Ok(mut submission) = self.store.get_submission(submission_id).await else {
            return;
        };
        submission.status = SubmissionStatus::InternalError;
        if let Err(e) = self.store.update_submission(submission).await {
            tracing::error!(
                "Failed to mark submission {} as internal error: {}",
                submission_id,
                e
            );
        }
    }
}

/// Map one execution outcome onto the result row for a case
fn case_result(submission_id: Uuid, case: &TestCase, outcome: ExecutionOutcome) -> TestResult {
    let ExecutionOutcome {
        status,
        stdout,
        stderr,
        runtime_ms,
        memory_kb,
        ..
    } = outcome;

    let (verdict, output) = match status {
        ExecutionStatus::CompileError => (Verdict::CompileError, stderr),
        ExecutionStatus::RuntimeError => (Verdict::RuntimeError, stderr),
        // Whatever a killed program managed to print carries no signal
        ExecutionStatus::TimeExceeded => (Verdict::TimeExceeded, String::new()),
        ExecutionStatus::Success => {
            if comparator::outputs_match(&case.expected_output, &stdout) {
                (Verdict::Accepted, stdout)
            } else {
                (Verdict::WrongAnswer, stdout)
            }
        }
    };

    TestResult::new(submission_id, case.id, verdict, output, runtime_ms, memory_kb)
}

/// Running aggregate over one evaluation pass
struct PassSummary {
    all_accepted: bool,
    any_internal: bool,
    max_runtime_ms: u64,
    max_memory_kb: u64,
}

impl PassSummary {
    fn new() -> Self {
        Self {
            all_accepted: true,
            any_internal: false,
            max_runtime_ms: 0,
            max_memory_kb: 0,
        }
    }

    fn fold(&mut self, result: &TestResult) {
        if !result.status.is_accepted() {
            self.all_accepted = false;
        }
        if result.status == Verdict::InternalError {
            self.any_internal = true;
        }
        self.max_runtime_ms = self.max_runtime_ms.max(result.runtime_ms);
        self.max_memory_kb = self.max_memory_kb.max(result.memory_kb);
    }

    /// A row that could not be persisted cannot count as a pass
    fn mark_write_failure(&mut self) {
        self.all_accepted = false;
    }

    fn final_status(&self) -> SubmissionStatus {
        if self.any_internal {
            SubmissionStatus::InternalError
        } else if self.all_accepted {
            SubmissionStatus::Accepted
        } else {
            SubmissionStatus::Failed
        }
    }
}
