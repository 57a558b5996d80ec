//! Per-user per-problem progress model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Progress of one user on one problem, keyed by (user_id, problem_id)
///
/// Created lazily on first evaluation. `solved` is monotone: once true it
/// never reverts, and `first_solved_at` is set exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProblemStatus {
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub attempted: bool,
    pub solved: bool,
    pub failed_attempts: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub first_solved_at: Option<DateTime<Utc>>,
}

impl UserProblemStatus {
    /// Fresh zero-value status for a (user, problem) pair
    pub fn new(user_id: Uuid, problem_id: Uuid) -> Self {
        Self {
            user_id,
            problem_id,
            attempted: false,
            solved: false,
            failed_attempts: 0,
            last_attempt_at: None,
            first_solved_at: None,
        }
    }

    /// Mark the start of an evaluation attempt
    pub fn record_attempt(&mut self, at: DateTime<Utc>) {
        self.attempted = true;
        self.last_attempt_at = Some(at);
    }

    /// Fold a finished evaluation's aggregate verdict into the progress record
    pub fn record_outcome(&mut self, accepted: bool, at: DateTime<Utc>) {
        if accepted {
            self.solved = true;
            // First accepted evaluation only; later passes keep the original
            self.first_solved_at.get_or_insert(at);
        } else {
            self.failed_attempts += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_is_monotone() {
        let mut status = UserProblemStatus::new(Uuid::new_v4(), Uuid::new_v4());
        let t1 = Utc::now();

        status.record_outcome(true, t1);
        assert!(status.solved);
        assert_eq!(status.first_solved_at, Some(t1));

        // A later failed evaluation must not revert solved
        status.record_outcome(false, Utc::now());
        assert!(status.solved);
        assert_eq!(status.failed_attempts, 1);
    }

    #[test]
    fn test_first_solved_at_set_once() {
        let mut status = UserProblemStatus::new(Uuid::new_v4(), Uuid::new_v4());
        let t1 = Utc::now();
        status.record_outcome(true, t1);

        let t2 = Utc::now();
        status.record_outcome(true, t2);
        assert_eq!(status.first_solved_at, Some(t1));
    }

    #[test]
    fn test_record_attempt() {
        let mut status = UserProblemStatus::new(Uuid::new_v4(), Uuid::new_v4());
        assert!(!status.attempted);

        let t = Utc::now();
        status.record_attempt(t);
        assert!(status.attempted);
        assert_eq!(status.last_attempt_at, Some(t));
        assert_eq!(status.failed_attempts, 0);
    }
}
