//! Port contracts for authentication.
//!
//! Account storage, password hashing and token signing are capabilities
//! injected into the auth service.

pub mod hasher;
pub mod repository;
pub mod token;

pub use hasher::{CredentialError, PasswordHasher};
pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use token::{TokenError, TokenIssuer};
