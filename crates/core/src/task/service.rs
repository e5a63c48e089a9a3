//! Task service
//!
//! Business rules the repository does not enforce: titles must not be
//! blank, new tasks default to `pending`, and updates are a
//! read-modify-write over the stored record.

use std::sync::Arc;

use async_trait::async_trait;

use super::model::{Task, TaskId, TaskPatch, STATUS_PENDING};
use super::repository::TaskRepository;
use crate::{Error, Result};

#[async_trait]
pub trait TaskService: Send + Sync {
    async fn list_tasks(&self, page: i64, limit: i64) -> Result<Vec<Task>>;

    async fn get_task(&self, id: TaskId) -> Result<Task>;

    /// Validate and persist a new task, returning it with id and timestamps set
    async fn create_task(&self, task: Task) -> Result<Task>;

    /// Overwrite title, description and status of an existing task
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task>;

    async fn delete_task(&self, id: TaskId) -> Result<()>;
}

/// Default service over any task repository
pub struct TaskManager {
    repo: Arc<dyn TaskRepository>,
}

impl TaskManager {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TaskService for TaskManager {
    async fn list_tasks(&self, page: i64, limit: i64) -> Result<Vec<Task>> {
        self.repo.find_all(page, limit).await
    }

    async fn get_task(&self, id: TaskId) -> Result<Task> {
        self.repo.find_by_id(id).await
    }

    async fn create_task(&self, mut task: Task) -> Result<Task> {
        if task.has_blank_title() {
            return Err(Error::TitleRequired);
        }
        if task.status.is_empty() {
            task.status = STATUS_PENDING.to_string();
        }
        self.repo.create(task).await
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> Result<Task> {
        if patch.title.trim().is_empty() {
            return Err(Error::TitleRequired);
        }

        let mut task = self.repo.find_by_id(id).await?;
        task.title = patch.title;
        task.description = patch.description;
        task.status = patch.status;

        self.repo.update(task).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.repo.find_by_id(id).await?;
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{InMemoryTaskStore, STATUS_COMPLETED};

    fn service() -> (TaskManager, Arc<InMemoryTaskStore>) {
        let store = Arc::new(InMemoryTaskStore::new());
        (TaskManager::new(store.clone()), store)
    }

    /// Repository whose every call fails, to check error propagation.
    struct BrokenStore;

    #[async_trait]
    impl TaskRepository for BrokenStore {
        async fn create(&self, _task: Task) -> Result<Task> {
            Err(Error::Storage("disk I/O error".into()))
        }
        async fn find_all(&self, _page: i64, _limit: i64) -> Result<Vec<Task>> {
            Err(Error::Storage("disk I/O error".into()))
        }
        async fn find_by_id(&self, _id: TaskId) -> Result<Task> {
            Err(Error::Storage("disk I/O error".into()))
        }
        async fn update(&self, _task: Task) -> Result<Task> {
            Err(Error::Storage("disk I/O error".into()))
        }
        async fn delete(&self, _id: TaskId) -> Result<()> {
            Err(Error::Storage("disk I/O error".into()))
        }
        async fn is_empty(&self) -> Result<bool> {
            Err(Error::Storage("disk I/O error".into()))
        }
    }

    fn patch(title: &str, description: &str, status: &str) -> TaskPatch {
        TaskPatch {
            title: title.to_string(),
            description: description.to_string(),
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn create_defaults_status_to_pending() {
        let (service, _) = service();
        let created = service.create_task(Task::new("Buy milk")).await.unwrap();

        assert_eq!(created.status, "pending");
        assert!(created.id > 0);

        let fetched = service.get_task(created.id).await.unwrap();
        assert_eq!(fetched.title, "Buy milk");
        assert_eq!(fetched.description, "");
        assert_eq!(fetched.status, "pending");
    }

    #[tokio::test]
    async fn create_keeps_supplied_status() {
        let (service, _) = service();
        let created = service
            .create_task(Task::new("Done already").with_status(STATUS_COMPLETED))
            .await
            .unwrap();
        assert_eq!(created.status, "completed");
    }

    #[tokio::test]
    async fn create_rejects_blank_title_without_persisting() {
        let (service, store) = service();

        for title in ["", "   ", "\t\n"] {
            let err = service.create_task(Task::new(title)).await.unwrap_err();
            assert!(matches!(err, Error::TitleRequired));
            assert_eq!(err.to_string(), "title is required");
        }
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn created_ids_are_fresh() {
        let (service, _) = service();
        let a = service.create_task(Task::new("a")).await.unwrap();
        service.delete_task(a.id).await.unwrap();
        let b = service.create_task(Task::new("b")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_overwrites_fields_verbatim() {
        let (service, _) = service();
        let created = service
            .create_task(Task::new("Draft").with_description("old"))
            .await
            .unwrap();

        let updated = service
            .update_task(created.id, patch("Final", "", "done"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.description, "");
        assert_eq!(updated.status, "done");

        let fetched = service.get_task(created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_with_blank_title_leaves_record_unchanged() {
        let (service, _) = service();
        let created = service.create_task(Task::new("Keep me")).await.unwrap();

        let err = service
            .update_task(created.id, patch("  ", "changed", "completed"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TitleRequired));

        let fetched = service.get_task(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found_and_creates_nothing() {
        let (service, store) = service();

        let err = service
            .update_task(999, patch("x", "", "done"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "task not found");
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (service, store) = service();
        let created = service.create_task(Task::new("Short lived")).await.unwrap();

        service.delete_task(created.id).await.unwrap();

        assert!(service.get_task(created.id).await.unwrap_err().is_not_found());
        assert!(service.delete_task(created.id).await.unwrap_err().is_not_found());
        assert!(service.list_tasks(1, 10).await.unwrap().is_empty());
        assert!(store.all_rows().await[0].is_deleted());
    }

    #[tokio::test]
    async fn pages_concatenate_to_full_set() {
        let (service, _) = service();
        for i in 0..23 {
            service.create_task(Task::new(format!("Task {i}"))).await.unwrap();
        }
        service.delete_task(5).await.unwrap();

        let mut seen = Vec::new();
        for page in 1..=3 {
            let batch = service.list_tasks(page, 10).await.unwrap();
            assert!(batch.len() <= 10);
            seen.extend(batch.into_iter().map(|t| t.id));
        }

        let expected: Vec<TaskId> = (1..=23).filter(|id| *id != 5).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let service = TaskManager::new(Arc::new(BrokenStore));

        let err = service.list_tasks(1, 10).await.unwrap_err();
        assert_eq!(err.to_string(), "disk I/O error");

        let err = service.create_task(Task::new("x")).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));

        let err = service.delete_task(1).await.unwrap_err();
        assert!(!err.is_not_found());
    }
}
