//! PostgreSQL Outbox Repository
//!
//! The ingest pipeline only ever inserts, inside the caller's transaction.
//! The pool-level methods exist for the external relay process and for
//! operational checks.

use async_trait::async_trait;
use railside_domain::outbox::{
    AggregateType, OutboxError, OutboxEventInsert, OutboxEventView, OutboxRepository,
    OutboxRepositoryTx,
};
use railside_domain::transaction::PgTransaction;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresOutboxRepository {
    pool: PgPool,
}

impl PostgresOutboxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row_to_view(row: PgRow) -> Result<OutboxEventView, OutboxError> {
    let aggregate_type: String = row.get("aggregate_type");
    let aggregate_type = match aggregate_type.as_str() {
        "JOURNEY" => AggregateType::Journey,
        other => {
            return Err(OutboxError::InfrastructureError {
                message: format!("Unknown aggregate type in outbox row: {}", other),
            });
        }
    };

    Ok(OutboxEventView {
        id: row.get("id"),
        aggregate_id: row.get("aggregate_id"),
        aggregate_type,
        event_type: row.get("event_type"),
        payload: row.get("payload"),
        correlation_id: row.get("correlation_id"),
        created_at: row.get("created_at"),
        published: row.get("published"),
        published_at: row.get("published_at"),
    })
}

#[async_trait]
impl OutboxRepositoryTx for PostgresOutboxRepository {
    async fn insert_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        event: &OutboxEventInsert,
    ) -> Result<(), OutboxError> {
        sqlx::query(
            r#"
            INSERT INTO outbox_events
                (aggregate_id, aggregate_type, event_type, payload, correlation_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.aggregate_id)
        .bind(event.aggregate_type.to_string())
        .bind(&event.event_type)
        .bind(&event.payload)
        .bind(&event.correlation_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl OutboxRepository for PostgresOutboxRepository {
    async fn get_pending(&self, limit: usize) -> Result<Vec<OutboxEventView>, OutboxError> {
        let rows = sqlx::query(
            r#"
            SELECT id, aggregate_id, aggregate_type, event_type, payload, correlation_id,
                   created_at, published, published_at
            FROM outbox_events
            WHERE published = FALSE
            ORDER BY created_at
            LIMIT $1
            FOR UPDATE SKIP LOCKED
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(map_row_to_view).collect()
    }

    async fn mark_published(&self, event_ids: &[Uuid]) -> Result<(), OutboxError> {
        if event_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            UPDATE outbox_events
            SET published = TRUE, published_at = NOW()
            WHERE id = ANY($1)
            "#,
        )
        .bind(event_ids)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_pending(&self) -> Result<u64, OutboxError> {
        let row = sqlx::query("SELECT COUNT(*) AS pending FROM outbox_events WHERE published = FALSE")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.get("pending");
        Ok(count as u64)
    }
}
