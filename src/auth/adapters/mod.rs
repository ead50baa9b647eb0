//! Adapter implementations for authentication ports.

pub mod jwt;
pub mod memory;
pub mod password;

pub use jwt::Hs256TokenIssuer;
pub use password::Argon2PasswordHasher;
