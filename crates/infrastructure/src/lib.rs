//! Infrastructure for the Railside journey platform.
//!
//! PostgreSQL persistence (repositories, idempotent migrations, the outbox
//! table) and the NATS JetStream ingestion pipeline (dispatcher + writer).

pub mod ingest;
pub mod messaging;
pub mod persistence;
