//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,
}

/// Error returned while parsing task statuses from the wire representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task sizes from the wire representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task size: {0}")]
pub struct ParseTaskSizeError(pub String);

/// Error returned while parsing task priorities from the wire representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
