//! Sample data for a fresh store

use super::model::{Task, STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_PENDING};
use super::repository::TaskRepository;
use crate::Result;

/// The fixed rows inserted into an empty store
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("Finish the storage refactor")
            .with_description("Move task persistence onto SQLite")
            .with_status(STATUS_IN_PROGRESS),
        Task::new("Read up on pagination")
            .with_description("LIMIT and OFFSET over the tasks table")
            .with_status(STATUS_PENDING),
        Task::new("Exercise the API by hand")
            .with_description("Try GET, POST, PUT and DELETE")
            .with_status(STATUS_PENDING),
        Task::new("Morning coffee")
            .with_description("Already done")
            .with_status(STATUS_COMPLETED),
        Task::new("Afternoon coffee")
            .with_description("Already done")
            .with_status(STATUS_COMPLETED),
        Task::new("Evening tea")
            .with_description("Already done")
            .with_status(STATUS_COMPLETED),
    ]
}

/// Insert the sample rows unless the store already holds any row
///
/// Returns how many rows were inserted.
pub async fn seed_if_empty(repo: &dyn TaskRepository) -> Result<usize> {
    if !repo.is_empty().await? {
        tracing::info!("Task store already seeded");
        return Ok(0);
    }

    tracing::info!("No tasks found, seeding store");
    let tasks = sample_tasks();
    let count = tasks.len();
    for task in tasks {
        repo.create(task).await?;
    }
    tracing::info!("Seeded {} tasks", count);
    Ok(count)
}
