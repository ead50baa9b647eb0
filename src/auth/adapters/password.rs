//! Argon2id password hashing.

use crate::auth::{
    domain::{Password, PasswordDigest},
    ports::{CredentialError, PasswordHasher},
};
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand_core::OsRng;
use std::fmt;

/// Password hasher producing Argon2id PHC strings.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl fmt::Debug for Argon2PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2PasswordHasher").finish_non_exhaustive()
    }
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the library's default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an Argon2id hasher with explicit cost parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        Ok(PasswordDigest::new(encoded.to_string()))
    }

    fn verify(&self, candidate: &str, digest: &PasswordDigest) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| CredentialError::MalformedDigest(err.to_string()))?;
        match self.argon2.verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::Hashing(err.to_string())),
        }
    }
}
