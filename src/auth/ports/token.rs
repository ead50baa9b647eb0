//! Port for issuing and verifying bearer tokens.

use crate::auth::domain::{AccessToken, TokenClaims};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Signed bearer token capability.
pub trait TokenIssuer: Send + Sync {
    /// Encodes and signs claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] when the claims cannot be encoded or
    /// signed.
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, TokenError>;

    /// Checks a token's signature and expiry at `now` and returns its
    /// claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`], [`TokenError::InvalidSignature`] or
    /// [`TokenError::Expired`] when the token is not acceptable.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError>;
}

/// Errors raised by token issuers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not a well-formed signed token.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// The signature does not match the token contents.
    #[error("token signature mismatch")]
    InvalidSignature,

    /// The token expiry has passed.
    #[error("token expired")]
    Expired,

    /// The claims could not be encoded or signed.
    #[error("token encoding failed: {0}")]
    Encoding(String),
}
