//! Demo data seeding
//!
//! Populates an empty store with a demo user and two sample problems so a
//! freshly started service can accept submissions immediately.

use crate::constants::{DEFAULT_MEMORY_LIMIT_KB, DEFAULT_TIME_LIMIT_MS};
use crate::error::AppResult;
use crate::models::{Difficulty, Problem, TestCase, User};
use crate::store::Store;

/// Insert demo data unless the store already has problems
pub async fn seed_if_empty(store: &dyn Store) -> AppResult<()> {
    if !store.list_problems().await?.is_empty() {
        return Ok(());
    }

    tracing::info!("Store is empty, seeding demo data");

    let demo = store
        .add_user(User::new(
            "demo".to_string(),
            "demo@example.com".to_string(),
        ))
        .await?;

    let sum = store
        .add_problem(Problem::new(
            "Sum of Two Integers".to_string(),
            "Read two space-separated integers from standard input and print \
             their sum on a single line."
                .to_string(),
            Difficulty::Easy,
            DEFAULT_TIME_LIMIT_MS,
            DEFAULT_MEMORY_LIMIT_KB,
            vec!["math".to_string(), "starter".to_string()],
        ))
        .await?;
    store
        .add_test_case(TestCase::new(
            sum.id,
            "1 2\n".to_string(),
            "3\n".to_string(),
            true,
        ))
        .await?;
    store
        .add_test_case(TestCase::new(
            sum.id,
            "-5 3\n".to_string(),
            "-2\n".to_string(),
            false,
        ))
        .await?;
    store
        .add_test_case(TestCase::new(
            sum.id,
            "1000000 1000000\n".to_string(),
            "2000000\n".to_string(),
            false,
        ))
        .await?;

    let reverse = store
        .add_problem(Problem::new(
            "Reverse a Line".to_string(),
            "Read one line from standard input and print it reversed."
                .to_string(),
            Difficulty::Easy,
            DEFAULT_TIME_LIMIT_MS,
            DEFAULT_MEMORY_LIMIT_KB,
            vec!["strings".to_string(), "starter".to_string()],
        ))
        .await?;
    store
        .add_test_case(TestCase::new(
            reverse.id,
            "hello\n".to_string(),
            "olleh\n".to_string(),
            true,
        ))
        .await?;
    store
        .add_test_case(TestCase::new(
            reverse.id,
            "racecar\n".to_string(),
            "racecar\n".to_string(),
            false,
        ))
        .await?;

    tracing::info!(
        "Seeded demo user {} and problems {}, {}",
        demo.username,
        sum.title,
        reverse.title
    );
    Ok(())
}
