//! In-memory task storage implementation
//!
//! Keeps rows in insertion order behind a lock. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::model::{Task, TaskId};
use super::repository::{page_offset, TaskRepository};
use crate::{Error, Result};

#[derive(Default)]
struct Rows {
    tasks: Vec<Task>,
    last_id: TaskId,
}

impl Rows {
    fn live_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id && !t.is_deleted())
    }
}

/// Volatile task store with the same semantics as the SQLite one
#[derive(Default)]
pub struct InMemoryTaskStore {
    rows: RwLock<Rows>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row, soft-deleted ones included
    pub async fn all_rows(&self) -> Vec<Task> {
        self.rows.read().await.tasks.clone()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn create(&self, mut task: Task) -> Result<Task> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;

        let now = Utc::now();
        task.id = rows.last_id;
        task.created_at = now;
        task.updated_at = now;
        task.deleted_at = None;

        rows.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Task>> {
        let rows = self.rows.read().await;
        let skip = usize::try_from(page_offset(page, limit)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(rows
            .tasks
            .iter()
            .filter(|t| !t.is_deleted())
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Task> {
        let rows = self.rows.read().await;
        rows.tasks
            .iter()
            .find(|t| t.id == id && !t.is_deleted())
            .cloned()
            .ok_or(Error::TaskNotFound(id))
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let mut rows = self.rows.write().await;
        let stored = rows
            .live_mut(task.id)
            .ok_or(Error::TaskNotFound(task.id))?;

        stored.title = task.title;
        stored.description = task.description;
        stored.status = task.status;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let mut rows = self.rows.write().await;
        let stored = rows.live_mut(id).ok_or(Error::TaskNotFound(id))?;
        stored.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.rows.read().await.tasks.is_empty())
    }
}
