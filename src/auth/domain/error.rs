//! Error types for account field validation.

use thiserror::Error;

/// Errors returned while constructing account values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthDomainError {
    /// The email address does not have a `local@domain.tld` shape.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The username is outside the accepted length range.
    #[error("username must be 3 to 30 characters, got '{0}'")]
    InvalidUsername(String),

    /// The password is shorter than the accepted minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
}
