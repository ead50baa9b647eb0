//! In-memory repository for user accounts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::auth::{
    domain::{EmailAddress, User, UserId, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn find_where(
        &self,
        predicate: impl Fn(&User) -> bool,
    ) -> UserRepositoryResult<Option<User>> {
        let users = self.state.read().map_err(poisoned)?;
        Ok(users.values().find(|user| predicate(user)).cloned())
    }
}

fn poisoned(err: impl ToString) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut users = self.state.write().map_err(poisoned)?;
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        if users
            .values()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }
        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let users = self.state.read().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        self.find_where(|user| user.email() == email)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> UserRepositoryResult<Option<User>> {
        self.find_where(|user| user.username() == username)
    }
}
