//! Error types for the core library

use thiserror::Error;

use crate::task::TaskId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("task not found")]
    TaskNotFound(TaskId),

    #[error("title is required")]
    TitleRequired,

    /// Raw message from the underlying store, surfaced to callers as-is.
    #[error("{0}")]
    Storage(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }
}
