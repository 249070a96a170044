//! Configuration module for the Railside journey platform
//!
//! Centralized configuration loading, validation, and immutable DTOs for
//! every component of the service.
//!
//! # Architecture
//!
//! 1. **Single Source of Truth**: all configuration is loaded once at startup
//! 2. **Fail Fast**: errors are reported immediately, no silent fallbacks
//! 3. **DTO Pattern**: configuration is immutable and passed via dependency injection
//! 4. **Env File Priority**: `.env` file > environment variables > error
//!
//! # Environment Variables
//!
//! ## Required
//!
//! - `RAILSIDE_DATABASE_URL`: PostgreSQL connection string
//! - `RAILSIDE_NATS_URL`: NATS connection URL (comma-separated for clusters)
//!
//! ## Optional
//!
//! - `RAILSIDE_DB_POOL_SIZE`: database pool size (default: 20)
//! - `RAILSIDE_DB_MIN_IDLE`: minimum idle connections (default: 2)
//! - `RAILSIDE_CONSUMER_NAME`: durable consumer name (default: "journey-ingest")
//! - `RAILSIDE_ACK_WAIT_SECS`: JetStream ack wait (default: 30)
//! - `RAILSIDE_MAX_DELIVER`: JetStream max delivery attempts (default: 3)
//! - `RUST_LOG`: log filter (default: "info")

pub mod dto;
pub mod error;
pub mod loader;
pub mod validator;

pub use dto::{ConsumerConfig, DatabaseConfig, LoggingConfig, NatsConfig, ServiceConfigDto};
pub use error::{ConfigError, Result};
pub use loader::ConfigLoader;
pub use validator::{
    validate_database_url, validate_nats_urls, validate_pool_config, validate_service_config,
};
