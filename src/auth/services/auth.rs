//! Service layer for registration, login and bearer authentication.

use crate::auth::{
    domain::{
        AccessToken, AuthDomainError, EmailAddress, Password, PasswordDigest, TokenClaims, User,
        UserId, UserProfile, Username,
    },
    ports::{
        CredentialError, PasswordHasher, TokenError, TokenIssuer, UserRepository,
        UserRepositoryError,
    },
};
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Hashed once per service and checked on logins for unknown emails, so
/// they cost the same as a wrong password.
const DECOY_PASSWORD: &str = "taskboard-decoy-password";

/// Default lifetime of issued tokens.
pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::days(7);

/// Request payload for registering an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterUserRequest {
    /// Creates a registration request from raw form values.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Request payload for logging in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request from raw form values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Authenticated account together with a fresh bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Public account data.
    pub user: UserProfile,
    /// Signed bearer token.
    pub token: AccessToken,
}

/// Service-level errors for authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A registration field failed validation.
    #[error(transparent)]
    Domain(#[from] AuthDomainError),
    /// Account storage failed.
    #[error(transparent)]
    Repository(UserRepositoryError),
    /// The email address is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(EmailAddress),
    /// The username is already registered.
    #[error("username already registered: {0}")]
    UsernameTaken(Username),
    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The bearer token was rejected.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] CredentialError),
    /// The authorization header is missing the bearer scheme.
    #[error("authorization header must use the Bearer scheme")]
    MissingBearer,
    /// The token refers to an account that no longer exists.
    #[error("user not found: {0}")]
    UnknownUser(UserId),
}

impl From<UserRepositoryError> for AuthError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(email) => Self::EmailTaken(email),
            UserRepositoryError::DuplicateUsername(username) => Self::UsernameTaken(username),
            UserRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Account registration and token authentication service.
#[derive(Clone)]
pub struct AuthService<R, H, I, C>
where
    R: UserRepository,
    H: PasswordHasher,
    I: TokenIssuer,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<I>,
    clock: Arc<C>,
    token_ttl: TimeDelta,
    decoy_digest: Arc<OnceLock<PasswordDigest>>,
}

impl<R, H, I, C> AuthService<R, H, I, C>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    I: TokenIssuer,
    C: Clock + Send + Sync,
{
    /// Creates a new auth service issuing tokens valid for seven days.
    #[must_use]
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            token_ttl: DEFAULT_TOKEN_TTL,
            decoy_digest: Arc::new(OnceLock::new()),
        }
    }

    /// Overrides the lifetime of issued tokens.
    #[must_use]
    pub const fn with_token_ttl(mut self, token_ttl: TimeDelta) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Registers an account and returns a session for it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Domain`] when a field is invalid,
    /// [`AuthError::EmailTaken`] or [`AuthError::UsernameTaken`] on
    /// conflicts, and other variants when hashing, signing or storage
    /// fails.
    pub async fn register(&self, request: RegisterUserRequest) -> AuthResult<AuthSession> {
        let RegisterUserRequest {
            username,
            email,
            password,
        } = request;
        let email_address = EmailAddress::new(email)?;
        let valid_username = Username::new(username)?;
        let valid_password = Password::new(password)?;

        if self.users.find_by_email(&email_address).await?.is_some() {
            return Err(AuthError::EmailTaken(email_address));
        }
        if self.users.find_by_username(&valid_username).await?.is_some() {
            return Err(AuthError::UsernameTaken(valid_username));
        }

        let digest = self
            .run_hasher(move |hasher| hasher.hash(&valid_password))
            .await?;
        let user = User::new(valid_username, email_address, digest, &*self.clock);
        self.users.store(&user).await?;
        tracing::info!(user_id = %user.id(), "user registered");

        self.open_session(&user)
    }

    /// Checks credentials and returns a session.
    ///
    /// Unknown emails and wrong passwords are indistinguishable.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the credentials do not
    /// match, and other variants when hashing, signing or storage fails.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<AuthSession> {
        let LoginRequest { email, password } = request;
        let Ok(email_address) = EmailAddress::new(email) else {
            return Err(AuthError::InvalidCredentials);
        };
        let Some(user) = self.users.find_by_email(&email_address).await? else {
            self.verify_decoy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };
        let digest = user.password_hash().clone();
        let matches = self
            .run_hasher(move |hasher| hasher.verify(&password, &digest))
            .await?;
        if !matches {
            tracing::debug!(user_id = %user.id(), "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        self.open_session(&user)
    }

    /// Verifies a bearer token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Token`] when the token is malformed, forged or
    /// expired.
    pub fn verify_token(&self, token: &str) -> AuthResult<TokenClaims> {
        Ok(self.tokens.verify(token, self.clock.utc())?)
    }

    /// Returns the public view of an account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Repository`] when lookup fails.
    pub async fn get_user(&self, id: UserId) -> AuthResult<Option<UserProfile>> {
        Ok(self
            .users
            .find_by_id(id)
            .await?
            .map(|user| user.profile()))
    }

    /// Resolves an `Authorization` header value to the calling account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingBearer`] when the scheme is absent,
    /// [`AuthError::Token`] when the token is rejected and
    /// [`AuthError::UnknownUser`] when the account no longer exists.
    pub async fn authenticate_bearer(&self, authorization: &str) -> AuthResult<UserProfile> {
        let Some(token) = authorization.strip_prefix(BEARER_PREFIX) else {
            return Err(AuthError::MissingBearer);
        };
        let claims = self.verify_token(token)?;
        self.get_user(claims.sub)
            .await?
            .ok_or(AuthError::UnknownUser(claims.sub))
    }

    /// Runs a hashing call on the blocking pool.
    async fn run_hasher<F, T>(&self, f: F) -> AuthResult<T>
    where
        F: FnOnce(&H) -> Result<T, CredentialError> + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let outcome = tokio::task::spawn_blocking(move || f(&hasher))
            .await
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        Ok(outcome?)
    }

    /// Checks `candidate` against the decoy digest and discards the result.
    async fn verify_decoy(&self, candidate: String) -> AuthResult<()> {
        let decoy = Arc::clone(&self.decoy_digest);
        self.run_hasher(move |hasher| {
            if let Some(digest) = decoy.get() {
                return hasher.verify(&candidate, digest).map(drop);
            }
            let password = Password::new(DECOY_PASSWORD)
                .map_err(|err| CredentialError::Hashing(err.to_string()))?;
            let fresh = hasher.hash(&password)?;
            let digest = decoy.get_or_init(|| fresh);
            hasher.verify(&candidate, digest).map(drop)
        })
        .await
    }

    fn open_session(&self, user: &User) -> AuthResult<AuthSession> {
        let claims = TokenClaims::new(user.id(), self.clock.utc(), self.token_ttl);
        let token = self.tokens.issue(&claims)?;
        Ok(AuthSession {
            user: user.profile(),
            token,
        })
    }
}
