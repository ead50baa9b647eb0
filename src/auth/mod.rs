//! User accounts and bearer-token authentication.
//!
//! Any authenticated user may read and change all tasks and projects; this
//! module only answers who the caller is. Hashing and token signing sit
//! behind the [`ports::PasswordHasher`] and [`ports::TokenIssuer`] ports.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
