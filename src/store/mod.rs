//! Result/status store
//!
//! Holds users, problems, test cases, submissions, per-case results and
//! per-user progress behind per-entity atomic operations. The store also
//! guarantees at most one in-flight evaluation per submission: the judge
//! takes an [`EvaluationClaim`] before mutating anything and the claim
//! releases itself when the evaluation ends, on every path.

mod memory;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Problem, Submission, TestCase, TestResult, User, UserProblemStatus};

pub use memory::MemoryStore;

/// Store-level failures
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("problem {0} not found")]
    ProblemNotFound(Uuid),

    #[error("submission {0} not found")]
    SubmissionNotFound(Uuid),

    #[error("test case {0} not found")]
    TestCaseNotFound(Uuid),

    #[error("user {0} already exists")]
    UserExists(String),

    #[error("submission {0} is already being evaluated")]
    EvaluationInProgress(Uuid),
}

/// Persistence operations used by the pipeline and the API layer
///
/// Every operation is atomic with respect to concurrent readers: a reader
/// never observes a half-updated record.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    // Users
    async fn add_user(&self, user: User) -> Result<User, StoreError>;
    async fn get_user(&self, id: Uuid) -> Result<User, StoreError>;

    // Problems
    async fn add_problem(&self, problem: Problem) -> Result<Problem, StoreError>;
    async fn get_problem(&self, id: Uuid) -> Result<Problem, StoreError>;
    async fn list_problems(&self) -> Result<Vec<Problem>, StoreError>;

    // Test cases
    async fn add_test_case(&self, case: TestCase) -> Result<TestCase, StoreError>;

    /// Test cases of a problem, in insertion order
    ///
    /// The order is stable per problem so re-runs of a submission see the
    /// same case sequence.
    async fn test_cases_for_problem(&self, problem_id: Uuid) -> Result<Vec<TestCase>, StoreError>;

    // Submissions
    async fn add_submission(&self, submission: Submission) -> Result<Submission, StoreError>;
    async fn get_submission(&self, id: Uuid) -> Result<Submission, StoreError>;
    async fn update_submission(&self, submission: Submission) -> Result<(), StoreError>;

    // Test results
    /// Append one result row; rejects rows whose submission or test case is
    /// unknown, or whose test case belongs to a different problem
    async fn add_test_result(&self, result: TestResult) -> Result<TestResult, StoreError>;

    /// Full result history for a submission, oldest first
    async fn results_for_submission(
        &self,
        submission_id: Uuid,
    ) -> Result<Vec<TestResult>, StoreError>;

    // Per-user progress
    /// Progress for (user, problem); a fresh zero-value record when none
    /// has been stored yet
    async fn user_problem_status(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
    ) -> Result<UserProblemStatus, StoreError>;

    async fn update_user_problem_status(
        &self,
        status: UserProblemStatus,
    ) -> Result<(), StoreError>;

    async fn statuses_for_user(&self, user_id: Uuid)
    -> Result<Vec<UserProblemStatus>, StoreError>;

    // Evaluation serialization
    /// Claim the exclusive right to evaluate a submission
    ///
    /// Fails with [`StoreError::EvaluationInProgress`] while another claim
    /// for the same submission is alive.
    async fn begin_evaluation(&self, submission_id: Uuid) -> Result<EvaluationClaim, StoreError>;
}

/// Set of submissions currently being evaluated
pub(crate) type ActiveEvaluations = Arc<Mutex<HashSet<Uuid>>>;

/// Exclusive right to evaluate one submission
///
/// Released on drop, so a panicking or erroring evaluation cannot leave its
/// submission permanently claimed.
#[derive(Debug)]
pub struct EvaluationClaim {
    submission_id: Uuid,
    active: ActiveEvaluations,
}

impl EvaluationClaim {
    /// Try to claim `submission_id`; `None` if already claimed
    pub(crate) fn acquire(active: &ActiveEvaluations, submission_id: Uuid) -> Option<Self> {
        let mut guard = active.lock().unwrap_or_else(PoisonError::into_inner);
        if !guard.insert(submission_id) {
            return None;
        }
        Some(Self {
            submission_id,
            active: Arc::clone(active),
        })
    }
}

impl Drop for EvaluationClaim {
    fn drop(&mut self) {
        let mut guard = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        guard.remove(&self.submission_id);
    }
}
