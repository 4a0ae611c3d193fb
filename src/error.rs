//! Error types for task operations and user input.

use thiserror::Error;

use crate::task::TaskCode;

/// Non-fatal outcomes reported by `TaskService` use-cases.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    /// No pending task has this code.
    #[error("task {0} not found")]
    NotFound(TaskCode),

    /// The recovery stack is empty.
    #[error("no deleted task to redo")]
    NothingToRedo,

    /// The store holds no pending tasks.
    #[error("no tasks")]
    EmptyStore,

    /// The store is not empty but no task matched the keyword.
    #[error("no tasks match \"{0}\"")]
    NoMatches(String),

    /// The store is not empty but no task has this category.
    #[error("no tasks in category \"{0}\"")]
    NoCategoryMatches(String),

    /// Nothing has been completed yet.
    #[error("no completed tasks yet")]
    NoCompletedTasks,
}

/// Errors raised while parsing what the user typed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("expected a whole number, got '{0}'")]
    NotANumber(String),

    #[error("expected a deadline as 'dd mm yyyy', got '{0}'")]
    BadDeadline(String),

    #[error("unknown menu choice '{0}'")]
    UnknownChoice(String),

    #[error("input ended")]
    EndOfInput,
}
