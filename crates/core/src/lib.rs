//! Core library for the task tracker
//!
//! This crate contains the business logic behind the HTTP API:
//! - Task model
//! - Repository contract with SQLite and in-memory stores
//! - Validation and update orchestration in the service layer

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
