//! Configuration loader
//!
//! Loads configuration from an optional .env file and the process
//! environment, then validates the result before handing it out.

use std::path::Path;

use super::dto::{ConsumerConfig, DatabaseConfig, LoggingConfig, NatsConfig, ServiceConfigDto};
use super::error::{ConfigError, Result};
use super::validator::validate_service_config;

/// Configuration loader
///
/// # Priority
///
/// Values from the .env file take precedence over the process environment,
/// which allows local development overrides without touching the system
/// environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Optional path to a .env file
    env_file_path: Option<std::path::PathBuf>,
}

impl ConfigLoader {
    /// Create a new ConfigLoader
    ///
    /// # Example
    ///
    /// ```
    /// use railside_shared::config::ConfigLoader;
    ///
    /// // Without .env file
    /// let loader = ConfigLoader::new(None);
    ///
    /// // With .env file
    /// let loader = ConfigLoader::new(Some(".env".into()));
    /// ```
    pub fn new(env_file_path: Option<std::path::PathBuf>) -> Self {
        Self { env_file_path }
    }

    /// Load and validate the full service configuration
    ///
    /// Returns `ConfigError` as soon as a required variable is missing or
    /// any value fails validation; nothing is defaulted silently except the
    /// documented optional variables.
    pub fn load_service_config(&self) -> Result<ServiceConfigDto> {
        if let Some(path) = &self.env_file_path {
            self.load_env_file(path)?;
        }

        let config = ServiceConfigDto {
            database: self.load_database_config()?,
            nats: self.load_nats_config()?,
            consumer: self.load_consumer_config()?,
            logging: self.load_logging_config(),
        };

        validate_service_config(&config)?;

        Ok(config)
    }

    fn load_env_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            // Missing .env is fine; the environment itself may be complete
            return Ok(());
        }

        dotenv::from_path(path).map_err(|source| ConfigError::EnvFileLoad {
            path: path.to_path_buf(),
            source,
        })
    }

    fn load_database_config(&self) -> Result<DatabaseConfig> {
        let url = required_var("RAILSIDE_DATABASE_URL")?;
        let pool_size = optional_parsed("RAILSIDE_DB_POOL_SIZE", 20)?;
        let min_idle = optional_parsed("RAILSIDE_DB_MIN_IDLE", 2)?;
        let connect_timeout_secs = optional_parsed("RAILSIDE_DB_CONNECT_TIMEOUT_SECS", 30)?;

        Ok(DatabaseConfig {
            url,
            pool_size,
            min_idle,
            connect_timeout_secs,
        })
    }

    fn load_nats_config(&self) -> Result<NatsConfig> {
        let raw = required_var("RAILSIDE_NATS_URL")?;
        let urls: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_secs = optional_parsed("RAILSIDE_NATS_TIMEOUT_SECS", 10)?;

        Ok(NatsConfig { urls, timeout_secs })
    }

    fn load_consumer_config(&self) -> Result<ConsumerConfig> {
        let defaults = ConsumerConfig::default();

        Ok(ConsumerConfig {
            name: std::env::var("RAILSIDE_CONSUMER_NAME").unwrap_or(defaults.name),
            ack_wait_secs: optional_parsed("RAILSIDE_ACK_WAIT_SECS", defaults.ack_wait_secs)?,
            max_deliver: optional_parsed("RAILSIDE_MAX_DELIVER", defaults.max_deliver)?,
            drain_timeout_secs: optional_parsed(
                "RAILSIDE_DRAIN_TIMEOUT_SECS",
                defaults.drain_timeout_secs,
            )?,
        })
    }

    fn load_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            filter: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

fn required_var(var: &str) -> Result<String> {
    std::env::var(var).map_err(|_| ConfigError::MissingRequired {
        var: var.to_string(),
    })
}

fn optional_parsed<T: std::str::FromStr>(var: &str, default: T) -> Result<T> {
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
