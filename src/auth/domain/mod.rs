//! Domain model for user accounts and bearer tokens.

mod credentials;
mod error;
mod ids;
mod token;
mod user;

pub use credentials::{EmailAddress, Password, Username};
pub use error::AuthDomainError;
pub use ids::UserId;
pub use token::{AccessToken, TokenClaims};
pub use user::{PasswordDigest, User, UserProfile};
