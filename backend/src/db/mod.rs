//! PostgreSQL access for stored user profiles
//!
//! The calculator itself never needs the database. The pool only backs the
//! `/users/:id/...` routes and the readiness probe.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const APPLICATION_NAME: &str = "fitplan";

/// Pool tuning that is not exposed through `AppConfig`
#[derive(Debug, Clone, Copy)]
pub struct PoolTuning {
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl PoolTuning {
    fn options(&self, max_connections: u32) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(self.min_connections.min(max_connections))
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
    }
}

/// Connect to the profile database described by `config`
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    connect_with(config, PoolTuning::default()).await
}

/// Connect with explicit pool tuning
pub async fn connect_with(config: &DatabaseConfig, tuning: PoolTuning) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("invalid database URL")?
        .application_name(APPLICATION_NAME);

    let pool = tuning
        .options(config.max_connections)
        .connect_with(options)
        .await
        .context("failed to connect to the profile database")?;

    info!(
        max_connections = config.max_connections,
        min_connections = tuning.min_connections,
        "Database pool ready"
    );

    Ok(pool)
}

/// Apply the bundled migrations (the `users` table)
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Applying database migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("database migration failed")?;
    Ok(())
}

/// Round-trip a trivial query and report how long it took
pub async fn ping(pool: &PgPool) -> Result<Duration, sqlx::Error> {
    let started = Instant::now();
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => Ok(started.elapsed()),
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            Err(e)
        }
    }
}
