//! Domain model for the Railside journey platform.
//!
//! Everything here is persistence-agnostic except for the transaction alias
//! used by the `*Tx` repository traits, which is deliberately PostgreSQL:
//! the database is the single consistency boundary of the pipeline.

pub mod ingest;
pub mod journeys;
pub mod outbox;
pub mod shared_kernel;
pub mod transaction;
