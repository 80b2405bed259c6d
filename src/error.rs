//! Error types.
//!
//! `TaskError` covers rejected user actions on the task list; none of them are
//! fatal and each leaves the controller untouched. `AppError` covers failures
//! of the surrounding application (terminal, script input, logging) and is
//! propagated up to `main`.

use std::io;

use thiserror::Error;

use crate::task::TaskId;

/// Reasons a task text is refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty task")]
    Empty,
    #[error("duplicate task")]
    Duplicate,
}

/// A rejected command on the task list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// Application-level failure.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("script line {line}: {source}")]
    ScriptRead {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
