//! Repository port for user accounts.

use crate::auth::domain::{EmailAddress, User, UserId, Username};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User account persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] or
    /// [`UserRepositoryError::DuplicateUsername`] when either field is
    /// already registered.
    async fn store(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds an account by identifier.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds an account by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Finds an account by username.
    async fn find_by_username(&self, username: &Username)
    -> UserRepositoryResult<Option<User>>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// The email address is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// The username is already registered.
    #[error("username already registered: {0}")]
    DuplicateUsername(Username),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
