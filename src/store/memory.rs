//! In-memory store
//!
//! Keeps every table in process memory behind a single async `RwLock`.
//! Test cases and test results live in insertion-ordered vectors so the
//! judge replays cases in a stable order and result history stays
//! chronological.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Problem, Submission, TestCase, TestResult, User, UserProblemStatus};

use super::{ActiveEvaluations, EvaluationClaim, Store, StoreError};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    problems: HashMap<Uuid, Problem>,
    test_cases: Vec<TestCase>,
    submissions: HashMap<Uuid, Submission>,
    test_results: Vec<TestResult>,
    user_statuses: HashMap<(Uuid, Uuid), UserProblemStatus>,
}

/// Process-local [`Store`] implementation
pub struct MemoryStore {
    tables: RwLock<Tables>,
    active_evaluations: ActiveEvaluations,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            active_evaluations: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn add_user(&self, user: User) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(StoreError::UserExists(user.username));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    async fn add_problem(&self, problem: Problem) -> Result<Problem, StoreError> {
        let mut tables = self.tables.write().await;
        tables.problems.insert(problem.id, problem.clone());
        Ok(problem)
    }

    async fn get_problem(&self, id: Uuid) -> Result<Problem, StoreError> {
        let tables = self.tables.read().await;
        tables
            .problems
            .get(&id)
            .cloned()
            .ok_or(StoreError::ProblemNotFound(id))
    }

    async fn list_problems(&self) -> Result<Vec<Problem>, StoreError> {
        let tables = self.tables.read().await;
        let mut problems: Vec<Problem> = tables.problems.values().cloned().collect();
        problems.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(problems)
    }

    async fn add_test_case(&self, case: TestCase) -> Result<TestCase, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.problems.contains_key(&case.problem_id) {
            return Err(StoreError::ProblemNotFound(case.problem_id));
        }
        tables.test_cases.push(case.clone());
        Ok(case)
    }

    async fn test_cases_for_problem(&self, problem_id: Uuid) -> Result<Vec<TestCase>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.problems.contains_key(&problem_id) {
            return Err(StoreError::ProblemNotFound(problem_id));
        }
        Ok(tables
            .test_cases
            .iter()
            .filter(|c| c.problem_id == problem_id)
            .cloned()
            .collect())
    }

    async fn add_submission(&self, submission: Submission) -> Result<Submission, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&submission.user_id) {
            return Err(StoreError::UserNotFound(submission.user_id));
        }
        if !tables.problems.contains_key(&submission.problem_id) {
            return Err(StoreError::ProblemNotFound(submission.problem_id));
        }
        tables.submissions.insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn get_submission(&self, id: Uuid) -> Result<Submission, StoreError> {
        let tables = self.tables.read().await;
        tables
            .submissions
            .get(&id)
            .cloned()
            .ok_or(StoreError::SubmissionNotFound(id))
    }

    async fn update_submission(&self, submission: Submission) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.submissions.contains_key(&submission.id) {
            return Err(StoreError::SubmissionNotFound(submission.id));
        }
        tables.submissions.insert(submission.id, submission);
        Ok(())
    }

    async fn add_test_result(&self, result: TestResult) -> Result<TestResult, StoreError> {
        let mut tables = self.tables.write().await;
        let problem_id = tables
            .submissions
            .get(&result.submission_id)
            .map(|s| s.problem_id)
            .ok_or(StoreError::SubmissionNotFound(result.submission_id))?;
        let case_matches = tables
            .test_cases
            .iter()
            .any(|c| c.id == result.test_case_id && c.problem_id == problem_id);
        if !case_matches {
            return Err(StoreError::TestCaseNotFound(result.test_case_id));
        }
        tables.test_results.push(result.clone());
        Ok(result)
    }

    async fn results_for_submission(
        &self,
        submission_id: Uuid,
    ) -> Result<Vec<TestResult>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.submissions.contains_key(&submission_id) {
            return Err(StoreError::SubmissionNotFound(submission_id));
        }
        Ok(tables
            .test_results
            .iter()
            .filter(|r| r.submission_id == submission_id)
            .cloned()
            .collect())
    }

    async fn user_problem_status(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
    ) -> Result<UserProblemStatus, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .user_statuses
            .get(&(user_id, problem_id))
            .cloned()
            .unwrap_or_else(|| UserProblemStatus::new(user_id, problem_id)))
    }

    async fn update_user_problem_status(
        &self,
        status: UserProblemStatus,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .user_statuses
            .insert((status.user_id, status.problem_id), status);
        Ok(())
    }

    async fn statuses_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserProblemStatus>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }
        let mut statuses: Vec<UserProblemStatus> = tables
            .user_statuses
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        statuses.sort_by(|a, b| a.last_attempt_at.cmp(&b.last_attempt_at));
        Ok(statuses)
    }

    async fn begin_evaluation(&self, submission_id: Uuid) -> Result<EvaluationClaim, StoreError> {
        EvaluationClaim::acquire(&self.active_evaluations, submission_id)
            .ok_or(StoreError::EvaluationInProgress(submission_id))
    }
}
