//! Task module
//!
//! This module contains task-related types, storage and business rules.

mod memory_store;
mod model;
mod repository;
mod seed;
mod service;
mod sqlite_store;

pub use memory_store::InMemoryTaskStore;
pub use model::*;
pub use repository::{page_offset, TaskRepository};
pub use seed::{sample_tasks, seed_if_empty};
pub use service::{TaskManager, TaskService};
pub use sqlite_store::SqliteTaskStore;
