//! Idempotent schema setup for the tables this service owns.
//!
//! All three tables belong exclusively to this service; no other service
//! writes to them, and cross-service readers consume only via the outbox.

use sqlx::PgPool;
use tracing::info;

/// Create the journeys, journey_segments, and outbox_events tables if they
/// do not exist. Safe to run on every startup.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journeys (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL,
            origin_crs VARCHAR(3) NOT NULL,
            destination_crs VARCHAR(3) NOT NULL,
            departure_at TIMESTAMPTZ NOT NULL,
            arrival_at TIMESTAMPTZ NOT NULL,
            journey_type VARCHAR(10) NOT NULL CHECK (journey_type IN ('single', 'return')),
            status VARCHAR(10) NOT NULL DEFAULT 'draft' CHECK (status IN ('draft', 'confirmed', 'cancelled')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journey_segments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            journey_id UUID NOT NULL REFERENCES journeys(id) ON DELETE CASCADE,
            segment_order INTEGER NOT NULL CHECK (segment_order >= 1),
            rid VARCHAR(20),
            toc_code VARCHAR(2),
            origin_crs VARCHAR(3) NOT NULL,
            destination_crs VARCHAR(3) NOT NULL,
            scheduled_departure TIMESTAMPTZ NOT NULL,
            scheduled_arrival TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (journey_id, segment_order)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS outbox_events (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            aggregate_id UUID NOT NULL,
            aggregate_type VARCHAR(20) NOT NULL CHECK (aggregate_type IN ('JOURNEY')),
            event_type VARCHAR(50) NOT NULL,
            payload JSONB NOT NULL,
            correlation_id VARCHAR(128) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            published BOOLEAN NOT NULL DEFAULT FALSE,
            published_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Partial index backing the relay's pending poll
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_outbox_unpublished_created
        ON outbox_events(created_at)
        WHERE published = FALSE
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_journey_segments_journey
        ON journey_segments(journey_id)
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database migrations applied");
    Ok(())
}
