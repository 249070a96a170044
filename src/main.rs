//! Railside journey ingestion service.
//!
//! Wires the ingestion pipeline together: configuration, database pool and
//! migrations, NATS JetStream, the aggregate writer, and the journey events
//! consumer. Shutdown on Ctrl-C stops intake, drains in-flight messages,
//! then disconnects.

use std::sync::Arc;

use anyhow::Context;
use railside_infrastructure::ingest::JourneyEventWriter;
use railside_infrastructure::messaging::{JourneyEventsConsumer, JourneyEventsConsumerConfig};
use railside_infrastructure::persistence::postgres::migrations::run_migrations;
use railside_infrastructure::persistence::{
    DatabasePool, DatabasePoolConfig, PostgresJourneyRepository, PostgresOutboxRepository,
};
use railside_shared::config::ConfigLoader;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new(Some(".env".into()))
        .load_service_config()
        .context("Failed to load service configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.logging.filter.clone()))
        .init();

    info!("🚆 Starting Railside journey ingestion service");

    let pool = DatabasePool::connect(
        &config.database.url,
        &DatabasePoolConfig::from(&config.database),
    )
    .await
    .context("Failed to connect to PostgreSQL")?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let nats_url = config.nats.urls.join(",");
    let client = async_nats::connect(&nats_url)
        .await
        .with_context(|| format!("Failed to connect to NATS at {}", nats_url))?;
    let jetstream = async_nats::jetstream::new(client.clone());
    info!(url = %nats_url, "Connected to NATS");

    let writer = JourneyEventWriter::new(
        pool.clone(),
        PostgresJourneyRepository::new(pool.clone()),
        PostgresOutboxRepository::new(pool.clone()),
    );

    let consumer = JourneyEventsConsumer::new(
        client.clone(),
        jetstream,
        Arc::new(writer),
        Some(JourneyEventsConsumerConfig::from(&config.consumer)),
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(());
        }
    });

    consumer
        .start(Some(shutdown_rx))
        .await
        .context("Consumer terminated with an error")?;

    client
        .drain()
        .await
        .context("Failed to drain NATS connection")?;

    info!("🚆 Railside journey ingestion service stopped");
    Ok(())
}
