pub mod organization;
pub mod schema;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use organization::queries::{
    create_organizations_table, ping, CreateOrganizationsTableError, PingError,
};

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("BuildPool: {source}")]
    BuildPool {
        #[from]
        source: r2d2::Error,
    },
    #[error("Ping: {source}")]
    Ping {
        #[from]
        source: PingError,
    },
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<ConnectError>,
    },
    #[error("Join: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Builds a pool for `url` and checks it answers `SELECT 1` within
/// `connection_timeout`.
pub fn build_pool(url: &str, connection_timeout: Duration) -> Result<PgPool, ConnectError> {
    let pool = Pool::builder()
        .connection_timeout(connection_timeout)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    let mut conn = pool.get()?;
    ping(&mut conn)?;
    drop(conn);
    Ok(pool)
}

/// Retries [`build_pool`] a fixed number of times with a fixed delay, to ride
/// out a database that is still starting.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool, ConnectError> {
    let attempts = config.connect_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let url = config.url();
        let timeout = config.connect_timeout;
        let result = tokio::task::spawn_blocking(move || build_pool(&url, timeout)).await?;

        match result {
            Ok(pool) => {
                info!(attempt, host = %config.host, "Connected to database");
                return Ok(pool);
            }
            Err(err) if attempt < attempts => {
                warn!(attempt, attempts, error = %err, "Waiting for database...");
                tokio::time::sleep(config.connect_delay).await;
            }
            Err(err) => {
                return Err(ConnectError::Exhausted {
                    attempts,
                    last: Box::new(err),
                })
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum InitSchemaError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },
    #[error(transparent)]
    CreateOrganizationsTable {
        #[from]
        source: CreateOrganizationsTableError,
    },
    #[error("Join: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Creates the `organizations` table if missing. Safe to run on every start.
pub async fn init_schema(pool: &PgPool) -> Result<(), InitSchemaError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), InitSchemaError> {
        let mut conn = pool.get()?;
        create_organizations_table(&mut conn)?;
        Ok(())
    })
    .await?
}
