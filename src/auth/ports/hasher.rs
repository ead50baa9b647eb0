//! Port for password hashing.

use crate::auth::domain::{Password, PasswordDigest};
use thiserror::Error;

/// One-way password hashing capability.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a password with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hashing`] when the hasher fails.
    fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError>;

    /// Checks a candidate password against a stored digest.
    ///
    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MalformedDigest`] when the stored digest
    /// cannot be parsed, or [`CredentialError::Hashing`] when verification
    /// fails for another reason.
    fn verify(&self, candidate: &str, digest: &PasswordDigest) -> Result<bool, CredentialError>;
}

/// Errors raised by password hashers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// Hashing or verification failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// The stored digest is not a valid encoded hash.
    #[error("malformed password digest: {0}")]
    MalformedDigest(String),
}
