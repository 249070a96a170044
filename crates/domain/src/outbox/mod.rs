//! Transactional outbox: the append-only ledger announcing committed domain
//! writes to the external relay.

pub mod model;
pub mod repository;

pub use model::{AggregateType, OutboxError, OutboxEventInsert, OutboxEventView};
pub use repository::{OutboxRepository, OutboxRepositoryTx};
