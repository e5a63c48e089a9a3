//! Application state

use std::sync::Arc;

use tasks_core::task::{
    InMemoryTaskStore, SqliteTaskStore, TaskManager, TaskRepository, TaskService,
};

use crate::config::{ServerConfig, StoreKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_service: Arc<dyn TaskService>,
    api_key: String,
}

impl AppState {
    /// Build state around a repository, wiring the default task service
    pub fn new(repo: Arc<dyn TaskRepository>, api_key: impl Into<String>) -> Self {
        Self::with_service(Arc::new(TaskManager::new(repo)), api_key)
    }

    pub fn with_service(task_service: Arc<dyn TaskService>, api_key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_service,
                api_key: api_key.into(),
            }),
        }
    }

    /// Get reference to the task service
    pub fn task_service(&self) -> &dyn TaskService {
        self.inner.task_service.as_ref()
    }

    /// Shared secret expected in the `X-API-Key` header
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }
}

/// Open the repository selected by the configuration
pub fn open_repository(config: &ServerConfig) -> tasks_core::Result<Arc<dyn TaskRepository>> {
    match config.store {
        StoreKind::Sqlite => {
            tracing::info!("Using SQLite task store at {:?}", config.db_path);
            Ok(Arc::new(SqliteTaskStore::open(&config.db_path)?))
        }
        StoreKind::Memory => {
            tracing::info!("Using in-memory task store");
            Ok(Arc::new(InMemoryTaskStore::new()))
        }
    }
}
