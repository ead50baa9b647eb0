//! Bearer token claims and the encoded token value.

use super::UserId;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Claims carried by an access token.
///
/// Timestamps are whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Authenticated user.
    pub sub: UserId,
    /// Issue time.
    pub iat: i64,
    /// Expiry time.
    pub exp: i64,
}

impl TokenClaims {
    /// Creates claims for `user_id` valid for `ttl` from `issued_at`.
    #[must_use]
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, ttl: TimeDelta) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: user_id,
            iat,
            exp: iat.saturating_add(ttl.num_seconds()),
        }
    }

    /// Returns `true` when the token is no longer valid at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Encoded bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps an encoded token.
    #[must_use]
    pub const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Returns the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
