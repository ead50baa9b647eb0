//! In-memory adapters for authentication.

mod user;

pub use user::InMemoryUserRepository;
