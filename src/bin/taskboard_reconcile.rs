//! Repairs drift between task bindings and project member lists.
//!
//! Usage:
//!
//! ```text
//! taskboard-reconcile
//! ```
//!
//! Configuration comes from the environment (and a `.env` file when
//! present); see [`taskboard::config`]. The pass trusts each task's project
//! binding, rebuilds every project's member list and progress to match, and
//! logs each repair. With in-memory storage there is nothing persisted to
//! repair and the command exits immediately.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::Arc;
use taskboard::config::{AppConfig, ConfigError, StorageMode};
use taskboard::membership::{MembershipCoordinator, MembershipError, ReconciliationReport};
use taskboard::project::adapters::postgres::PostgresProjectRepository;
use taskboard::task::adapters::postgres::PostgresTaskRepository;
use taskboard::telemetry;
use thiserror::Error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum ReconcileError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to create connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("reconciliation failed: {0}")]
    Membership(#[from] MembershipError),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    telemetry::init(telemetry::DEFAULT_DIRECTIVE)?;

    let config = AppConfig::from_env().map_err(ReconcileError::from)?;
    let Some(database_url) = postgres_url(&config) else {
        tracing::info!("in-memory storage selected; nothing to reconcile");
        return Ok(());
    };

    let report = reconcile(database_url).await?;
    log_report(&report);
    Ok(())
}

fn postgres_url(config: &AppConfig) -> Option<&str> {
    match config.storage() {
        StorageMode::Memory => None,
        StorageMode::Postgres => config.database_url(),
    }
}

async fn reconcile(database_url: &str) -> Result<ReconciliationReport, ReconcileError> {
    let pool = Pool::builder()
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(ReconcileError::Pool)?;
    let coordinator = MembershipCoordinator::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresProjectRepository::new(pool)),
        Arc::new(mockable::DefaultClock),
    );
    Ok(coordinator.reconcile().await?)
}

fn log_report(report: &ReconciliationReport) {
    if report.is_clean() {
        tracing::info!("task and project membership is consistent");
        return;
    }
    tracing::info!(
        unbound_tasks = report.unbound_tasks.len(),
        removed_members = report.removed_members.len(),
        added_members = report.added_members.len(),
        corrected_progress = report.corrected_progress.len(),
        "membership repaired"
    );
}
