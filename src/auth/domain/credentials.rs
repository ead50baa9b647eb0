//! Validated account fields.

use super::AuthDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

const USERNAME_LENGTH: RangeInclusive<usize> = 3..=30;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Trimmed username of 3 to 30 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::InvalidUsername`] when the trimmed value is
    /// shorter than 3 or longer than 30 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if !USERNAME_LENGTH.contains(&trimmed.chars().count()) {
            return Err(AuthDomainError::InvalidUsername(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercased email address with a `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// The input is trimmed and lowercased. The local part and the domain
    /// must be non-empty and free of whitespace and `@`; the domain must
    /// contain a dot with characters on both sides.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::InvalidEmail`] when the shape check fails.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();
        if !has_email_shape(&normalized) {
            return Err(AuthDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_email_shape(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    let is_atom = |part: &str| {
        !part.is_empty() && !part.chars().any(|c| c == '@' || c.is_whitespace())
    };
    if !is_atom(local) || !is_atom(domain) {
        return false;
    }
    let last = domain.len().saturating_sub(1);
    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index < last)
}

/// Plain-text password accepted at registration.
///
/// The value is never printed by `Debug` and is not serialisable.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a password that meets the minimum length.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::PasswordTooShort`] when the value has fewer
    /// than 6 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthDomainError> {
        let raw = value.into();
        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthDomainError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the plain-text value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
