//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{Task, TaskId};
use crate::Result;

/// Repository interface for task CRUD operations
///
/// Every read skips soft-deleted rows.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task, returning it with its assigned id and timestamps
    async fn create(&self, task: Task) -> Result<Task>;

    /// List live tasks in insertion order, one page at a time
    ///
    /// A negative `limit` returns every row past the offset.
    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Task>>;

    /// Get a live task by ID
    async fn find_by_id(&self, id: TaskId) -> Result<Task>;

    /// Overwrite title, description and status of a live task
    async fn update(&self, task: Task) -> Result<Task>;

    /// Mark a live task as deleted
    async fn delete(&self, id: TaskId) -> Result<()>;

    /// True when the store holds no rows at all, deleted ones included
    async fn is_empty(&self) -> Result<bool>;
}

/// Number of rows to skip for a 1-based page, never negative
pub fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit).max(0)
}
