//! Outbox repository contracts.

use crate::outbox::model::{OutboxError, OutboxEventInsert, OutboxEventView};
use crate::transaction::PgTransaction;
use async_trait::async_trait;
use uuid::Uuid;

/// Transactional outbox writes.
///
/// The insert MUST happen inside the same transaction as the domain write it
/// announces; that is the whole point of the pattern.
#[async_trait]
pub trait OutboxRepositoryTx: Send + Sync {
    async fn insert_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        event: &OutboxEventInsert,
    ) -> Result<(), OutboxError>;
}

/// Pool-level outbox access used by the external relay and by health checks.
/// This pipeline itself only ever inserts.
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    /// Fetch unpublished events oldest-first, skipping rows another relay
    /// instance has locked.
    async fn get_pending(&self, limit: usize) -> Result<Vec<OutboxEventView>, OutboxError>;

    async fn mark_published(&self, event_ids: &[Uuid]) -> Result<(), OutboxError>;

    async fn count_pending(&self) -> Result<u64, OutboxError>;
}
