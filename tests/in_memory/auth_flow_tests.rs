//! Account registration and bearer authentication wired from configuration.

use std::sync::Arc;

use crate::test_helpers::ManualClock;
use argon2::Params;
use chrono::TimeDelta;
use rstest::{fixture, rstest};
use taskboard::auth::{
    adapters::{Argon2PasswordHasher, Hs256TokenIssuer, memory::InMemoryUserRepository},
    services::{AuthError, AuthService, LoginRequest, RegisterUserRequest},
};
use taskboard::config::AppConfig;

type Service =
    AuthService<InMemoryUserRepository, Argon2PasswordHasher, Hs256TokenIssuer, ManualClock>;

struct Accounts {
    service: Service,
    clock: Arc<ManualClock>,
}

#[fixture]
fn accounts() -> Accounts {
    let config = AppConfig::builder()
        .token_secret("integration-secret")
        .token_ttl_hours(2)
        .build()
        .expect("valid configuration");
    let settings = config.token_settings().expect("secret is configured");
    let params = Params::new(8, 1, 1, None).expect("valid argon2 params");
    let clock = Arc::new(ManualClock::fixed());
    let service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::with_params(params)),
        Arc::new(Hs256TokenIssuer::new(settings.secret())),
        Arc::clone(&clock),
    )
    .with_token_ttl(settings.ttl());
    Accounts { service, clock }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_token_authenticates_until_configured_expiry(
    accounts: Accounts,
) -> eyre::Result<()> {
    let registered = accounts
        .service
        .register(RegisterUserRequest::new("grace", "grace@example.org", "compiler"))
        .await?;
    let session = accounts
        .service
        .login(LoginRequest::new("grace@example.org", "compiler"))
        .await?;
    let header = format!("Bearer {}", session.token.as_str());

    let caller = accounts.service.authenticate_bearer(&header).await?;
    eyre::ensure!(caller == registered.user, "bearer should resolve to registrant");

    accounts.clock.advance(TimeDelta::hours(2));
    let expired = accounts.service.authenticate_bearer(&header).await;
    eyre::ensure!(
        matches!(expired, Err(AuthError::Token(_))),
        "token should expire after the configured lifetime, got {expired:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tokens_from_another_secret_are_refused(accounts: Accounts) -> eyre::Result<()> {
    let session = accounts
        .service
        .register(RegisterUserRequest::new("linus", "linus@example.org", "monolith"))
        .await?;
    let params = Params::new(8, 1, 1, None).map_err(|err| eyre::eyre!("{err}"))?;
    let other = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::with_params(params)),
        Arc::new(Hs256TokenIssuer::new("different-secret")),
        Arc::clone(&accounts.clock),
    );

    let result = other.verify_token(session.token.as_str());

    eyre::ensure!(
        matches!(result, Err(AuthError::Token(_))),
        "foreign token should be rejected, got {result:?}"
    );
    Ok(())
}
