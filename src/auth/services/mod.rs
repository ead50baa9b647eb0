//! Application services for authentication.

mod auth;

pub use auth::{
    AuthError, AuthResult, AuthService, AuthSession, DEFAULT_TOKEN_TTL, LoginRequest,
    RegisterUserRequest,
};
