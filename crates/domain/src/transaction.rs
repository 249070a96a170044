//! Transaction alias shared by the `*Tx` repository traits.
//!
//! Every ingest recipe runs as one PostgreSQL transaction: journey upsert,
//! segment writes, and the outbox insert commit together or not at all.
//! Repositories take the transaction by `&mut` so a single recipe can thread
//! one transaction through several repositories; dropping it without an
//! explicit commit rolls everything back.

/// Type alias for a PostgreSQL transaction
pub type PgTransaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
