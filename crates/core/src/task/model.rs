//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier
pub type TaskId = u64;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

/// A tracked task
///
/// `status` is a free-form label. The three `STATUS_*` constants are the
/// conventional values, but updates store whatever the caller sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker. Rows with this set are hidden from every read.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create an unsaved task with the given title
    ///
    /// The id stays zero until a repository assigns one.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: title.into(),
            description: String::new(),
            status: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Whether the title is blank once surrounding whitespace is removed
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// Fields a caller may overwrite on an existing task
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}
