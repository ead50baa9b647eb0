//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// A progress value lies outside `0..=100`.
    #[error("progress must be between 0 and 100, got {0}")]
    InvalidProgress(i64),
}
