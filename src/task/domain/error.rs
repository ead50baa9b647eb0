//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The look-ahead window for upcoming deadlines is not positive.
    #[error("deadline window must span at least one day, got {0}")]
    InvalidDeadlineWindow(u32),

    /// A deadline string could not be parsed as a timestamp or date.
    #[error("invalid deadline '{0}', expected RFC 3339 timestamp or YYYY-MM-DD date")]
    InvalidDeadline(String),
}

/// Error returned while parsing task statuses from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
