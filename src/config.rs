//! Environment-driven application configuration.
//!
//! # Environment Variables
//!
//! - `TASKBOARD_STORAGE`: `memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when
//!   `TASKBOARD_STORAGE=postgres`)
//! - `TASKBOARD_TOKEN_SECRET`: signing secret for bearer tokens
//! - `TASKBOARD_TOKEN_TTL_HOURS`: token lifetime in hours (default 168)

use chrono::TimeDelta;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Variable selecting the storage backend.
pub const STORAGE_VAR: &str = "TASKBOARD_STORAGE";
/// Variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Variable holding the token signing secret.
pub const TOKEN_SECRET_VAR: &str = "TASKBOARD_TOKEN_SECRET";
/// Variable holding the token lifetime in hours.
pub const TOKEN_TTL_VAR: &str = "TASKBOARD_TOKEN_TTL_HOURS";

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL_HOURS: u32 = 168;

/// Storage backend for tasks and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local maps; contents are lost on exit.
    #[default]
    Memory,
    /// `PostgreSQL` through Diesel.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "in_memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(ConfigError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Bearer token signing settings.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSettings {
    secret: String,
    ttl: TimeDelta,
}

impl TokenSettings {
    /// Returns the signing secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    storage: StorageMode,
    database_url: Option<String>,
    token_secret: Option<String>,
    token_ttl_hours: u32,
}

impl AppConfig {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is invalid or a required value
    /// is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable
    /// name to its value.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is invalid or a required value
    /// is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut builder = Self::builder();
        if let Some(value) = read(STORAGE_VAR) {
            builder = builder.storage(value.parse()?);
        }
        if let Some(value) = read(DATABASE_URL_VAR) {
            builder = builder.database_url(value);
        }
        if let Some(value) = read(TOKEN_SECRET_VAR) {
            builder = builder.token_secret(value);
        }
        if let Some(value) = read(TOKEN_TTL_VAR) {
            let hours = value
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidTokenTtl(value.clone()))?;
            builder = builder.token_ttl_hours(hours);
        }
        builder.build()
    }

    /// Returns the selected storage backend.
    #[must_use]
    pub const fn storage(&self) -> StorageMode {
        self.storage
    }

    /// Returns the `PostgreSQL` connection URL, if configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Returns the token settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTokenSecret`] when no signing secret is
    /// configured.
    pub fn token_settings(&self) -> Result<TokenSettings, ConfigError> {
        let secret = self
            .token_secret
            .clone()
            .ok_or(ConfigError::MissingTokenSecret)?;
        Ok(TokenSettings {
            secret,
            ttl: TimeDelta::hours(i64::from(self.token_ttl_hours)),
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("storage", &self.storage)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<set>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug, Clone)]
pub struct AppConfigBuilder {
    storage: StorageMode,
    database_url: Option<String>,
    token_secret: Option<String>,
    token_ttl_hours: u32,
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            database_url: None,
            token_secret: None,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

impl AppConfigBuilder {
    /// Sets the storage backend.
    #[must_use]
    pub const fn storage(mut self, storage: StorageMode) -> Self {
        self.storage = storage;
        self
    }

    /// Sets the `PostgreSQL` connection URL.
    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Sets the token signing secret.
    #[must_use]
    pub fn token_secret(mut self, secret: impl Into<String>) -> Self {
        self.token_secret = Some(secret.into());
        self
    }

    /// Sets the token lifetime in hours.
    #[must_use]
    pub const fn token_ttl_hours(mut self, hours: u32) -> Self {
        self.token_ttl_hours = hours;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when `PostgreSQL` storage
    /// has no URL, or [`ConfigError::InvalidTokenTtl`] when the lifetime is
    /// zero.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        if self.storage == StorageMode::Postgres && self.database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.token_ttl_hours == 0 {
            return Err(ConfigError::InvalidTokenTtl(
                self.token_ttl_hours.to_string(),
            ));
        }
        Ok(AppConfig {
            storage: self.storage,
            database_url: self.database_url,
            token_secret: self.token_secret,
            token_ttl_hours: self.token_ttl_hours,
        })
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The storage backend name is not recognised.
    #[error("invalid {STORAGE_VAR} '{0}', expected 'memory' or 'postgres'")]
    InvalidStorageMode(String),

    /// `PostgreSQL` storage was selected without a connection URL.
    #[error("{DATABASE_URL_VAR} is required when {STORAGE_VAR}=postgres")]
    MissingDatabaseUrl,

    /// The token lifetime is not a positive whole number of hours.
    #[error("invalid {TOKEN_TTL_VAR} '{0}', expected a positive number of hours")]
    InvalidTokenTtl(String),

    /// No token signing secret is configured.
    #[error("{TOKEN_SECRET_VAR} is required to issue tokens")]
    MissingTokenSecret,
}
