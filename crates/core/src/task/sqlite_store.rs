//! SQLite task storage implementation
//!
//! One `tasks` table. Deletion only stamps `deleted_at`, so every query
//! that serves callers filters on `deleted_at IS NULL`.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;

use super::model::{Task, TaskId};
use super::repository::{page_offset, TaskRepository};
use crate::{Error, Result};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_tasks_deleted_at ON tasks (deleted_at);
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, status, created_at, updated_at, deleted_at FROM tasks";

/// SQLite-backed task store
pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
}

impl SqliteTaskStore {
    /// Open (or create) a database file and verify the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!("Opened task database at {:?}", path.as_ref());
        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Wrap an already opened connection, creating the schema if missing
    pub fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Total number of rows, soft-deleted ones included
    pub async fn count_all(&self) -> Result<u64> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
        let id: i64 = row.get("id")?;
        Ok(Task {
            id: id as TaskId,
            title: row.get("title")?,
            description: row.get("description")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            deleted_at: row.get::<_, Option<DateTime<Utc>>>("deleted_at")?,
        })
    }

    fn fetch_live(conn: &Connection, id: TaskId) -> Result<Task> {
        let Some(key) = sql_id(id) else {
            return Err(Error::TaskNotFound(id));
        };
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1 AND deleted_at IS NULL"),
            params![key],
            Self::row_to_task,
        )
        .optional()?
        .ok_or(Error::TaskNotFound(id))
    }
}

/// SQLite rowids are signed; ids past `i64::MAX` cannot exist
fn sql_id(id: TaskId) -> Option<i64> {
    i64::try_from(id).ok()
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn create(&self, mut task: Task) -> Result<Task> {
        let now = Utc::now();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO tasks (title, description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![task.title, task.description, task.status, now, now],
        )?;

        task.id = conn.last_insert_rowid() as TaskId;
        task.created_at = now;
        task.updated_at = now;
        task.deleted_at = None;
        Ok(task)
    }

    async fn find_all(&self, page: i64, limit: i64) -> Result<Vec<Task>> {
        let offset = page_offset(page, limit);
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE deleted_at IS NULL ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let tasks = stmt
            .query_map(params![limit, offset], Self::row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Task> {
        let conn = self.conn.lock().await;
        Self::fetch_live(&conn, id)
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let key = sql_id(task.id).ok_or(Error::TaskNotFound(task.id))?;
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, status = ?3, updated_at = ?4
             WHERE id = ?5 AND deleted_at IS NULL",
            params![task.title, task.description, task.status, Utc::now(), key],
        )?;
        if changed == 0 {
            return Err(Error::TaskNotFound(task.id));
        }
        Self::fetch_live(&conn, task.id)
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let key = sql_id(id).ok_or(Error::TaskNotFound(id))?;
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE tasks SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            params![Utc::now(), key],
        )?;
        if changed == 0 {
            return Err(Error::TaskNotFound(id));
        }
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.count_all().await? == 0)
    }
}
