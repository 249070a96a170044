//! Centralized PostgreSQL connection pool management.
//!
//! The pool is created once in `main` and passed to every repository. It is
//! the only shared mutable resource in the pipeline: each ingest recipe
//! borrows one connection for the lifetime of its transaction and returns it
//! on every exit path.

use railside_shared::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DatabasePoolError {
    #[error("Failed to connect to database: {0}")]
    Connection(#[from] sqlx::Error),
}

/// Pool sizing and timeouts.
#[derive(Debug, Clone)]
pub struct DatabasePoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for DatabasePoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl From<&DatabaseConfig> for DatabasePoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.pool_size,
            min_connections: config.min_idle,
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            ..Default::default()
        }
    }
}

/// Centralized database pool.
pub struct DatabasePool;

impl DatabasePool {
    /// Connect with the given configuration. Fails fast: an unreachable
    /// database aborts startup rather than limping along.
    pub async fn connect(
        url: &str,
        config: &DatabasePoolConfig,
    ) -> Result<PgPool, DatabasePoolError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(url)
            .await?;

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Database pool established"
        );

        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_config_is_bounded() {
        let config = DatabasePoolConfig::default();
        assert!(config.max_connections >= config.min_connections);
        assert!(config.connect_timeout > Duration::ZERO);
    }

    #[test]
    fn pool_config_maps_from_database_config() {
        let db = DatabaseConfig {
            url: "postgres://localhost/railside".to_string(),
            pool_size: 7,
            min_idle: 3,
            connect_timeout_secs: 5,
        };
        let config = DatabasePoolConfig::from(&db);
        assert_eq!(config.max_connections, 7);
        assert_eq!(config.min_connections, 3);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }
}
