//! PostgreSQL Journey Repository
//!
//! Implements both the pool-level read contract and the transactional write
//! contract over the `journeys` and `journey_segments` tables.

use async_trait::async_trait;
use railside_domain::journeys::{
    Journey, JourneyKind, JourneyRepository, JourneyRepositoryTx, JourneySegment,
};
use railside_domain::shared_kernel::{DomainError, JourneyId, JourneyStatus, Result, UserId};
use railside_domain::transaction::PgTransaction;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;

#[derive(Clone)]
pub struct PostgresJourneyRepository {
    pool: PgPool,
}

impl PostgresJourneyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row_to_journey(row: PgRow) -> Result<Journey> {
    let kind_str: String = row.get("journey_type");
    let kind = JourneyKind::from_str(&kind_str)
        .map_err(|e| DomainError::InfrastructureError { message: e })?;

    let status_str: String = row.get("status");
    let status = JourneyStatus::from_str(&status_str)
        .map_err(|e| DomainError::InfrastructureError { message: e })?;

    Ok(Journey {
        id: JourneyId::from_uuid(row.get("id")),
        user_id: UserId::from_uuid(row.get("user_id")),
        origin_crs: row.get("origin_crs"),
        destination_crs: row.get("destination_crs"),
        departure_at: row.get("departure_at"),
        arrival_at: row.get("arrival_at"),
        kind,
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn map_row_to_segment(row: PgRow) -> JourneySegment {
    JourneySegment {
        journey_id: JourneyId::from_uuid(row.get("journey_id")),
        segment_order: row.get("segment_order"),
        rid: row.get("rid"),
        toc_code: row.get("toc_code"),
        origin_crs: row.get("origin_crs"),
        destination_crs: row.get("destination_crs"),
        scheduled_departure: row.get("scheduled_departure"),
        scheduled_arrival: row.get("scheduled_arrival"),
    }
}

const JOURNEY_COLUMNS: &str = "id, user_id, origin_crs, destination_crs, departure_at, \
     arrival_at, journey_type, status, created_at, updated_at";

#[async_trait]
impl JourneyRepository for PostgresJourneyRepository {
    async fn find_by_id(&self, journey_id: &JourneyId) -> Result<Option<Journey>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM journeys WHERE id = $1",
            JOURNEY_COLUMNS
        ))
        .bind(journey_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError {
            message: format!("Failed to find journey by id: {}", e),
        })?;

        row.map(map_row_to_journey).transpose()
    }

    async fn list_segments(&self, journey_id: &JourneyId) -> Result<Vec<JourneySegment>> {
        let rows = sqlx::query(
            r#"
            SELECT journey_id, segment_order, rid, toc_code, origin_crs, destination_crs,
                   scheduled_departure, scheduled_arrival
            FROM journey_segments
            WHERE journey_id = $1
            ORDER BY segment_order
            "#,
        )
        .bind(journey_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError {
            message: format!("Failed to list journey segments: {}", e),
        })?;

        Ok(rows.into_iter().map(map_row_to_segment).collect())
    }
}

#[async_trait]
impl JourneyRepositoryTx for PostgresJourneyRepository {
    async fn upsert_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey: &Journey,
    ) -> Result<Journey> {
        // Status stays untouched on conflict so a replayed creation event
        // cannot roll a confirmed journey back to draft. RETURNING hands the
        // caller the persisted row, stored status included.
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO journeys
                (id, user_id, origin_crs, destination_crs, departure_at, arrival_at,
                 journey_type, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                origin_crs = EXCLUDED.origin_crs,
                destination_crs = EXCLUDED.destination_crs,
                departure_at = EXCLUDED.departure_at,
                arrival_at = EXCLUDED.arrival_at,
                journey_type = EXCLUDED.journey_type,
                updated_at = NOW()
            RETURNING {}
            "#,
            JOURNEY_COLUMNS
        ))
        .bind(journey.id.0)
        .bind(journey.user_id.0)
        .bind(&journey.origin_crs)
        .bind(&journey.destination_crs)
        .bind(journey.departure_at)
        .bind(journey.arrival_at)
        .bind(journey.kind.as_str())
        .bind(journey.status.as_str())
        .bind(journey.created_at)
        .bind(journey.updated_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| DomainError::InfrastructureError {
            message: format!("Failed to upsert journey in transaction: {}", e),
        })?;

        map_row_to_journey(row)
    }

    async fn find_by_id_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey_id: &JourneyId,
    ) -> Result<Option<Journey>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM journeys WHERE id = $1",
            JOURNEY_COLUMNS
        ))
        .bind(journey_id.0)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| DomainError::InfrastructureError {
            message: format!("Failed to find journey by id in transaction: {}", e),
        })?;

        row.map(map_row_to_journey).transpose()
    }

    async fn update_status_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey_id: &JourneyId,
        status: JourneyStatus,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE journeys SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status.as_str())
            .bind(journey_id.0)
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::InfrastructureError {
                message: format!("Failed to update journey status in transaction: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::JourneyNotFound {
                journey_id: *journey_id,
            });
        }

        Ok(())
    }

    async fn replace_segments_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey_id: &JourneyId,
        segments: &[JourneySegment],
    ) -> Result<()> {
        sqlx::query("DELETE FROM journey_segments WHERE journey_id = $1")
            .bind(journey_id.0)
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::InfrastructureError {
                message: format!("Failed to clear journey segments in transaction: {}", e),
            })?;

        for segment in segments {
            sqlx::query(
                r#"
                INSERT INTO journey_segments
                    (journey_id, segment_order, rid, toc_code, origin_crs, destination_crs,
                     scheduled_departure, scheduled_arrival)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(segment.journey_id.0)
            .bind(segment.segment_order)
            .bind(&segment.rid)
            .bind(&segment.toc_code)
            .bind(&segment.origin_crs)
            .bind(&segment.destination_crs)
            .bind(segment.scheduled_departure)
            .bind(segment.scheduled_arrival)
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::InfrastructureError {
                message: format!("Failed to insert journey segment in transaction: {}", e),
            })?;
        }

        Ok(())
    }

    async fn insert_segment_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        segment: &JourneySegment,
    ) -> Result<bool> {
        // DO NOTHING keeps the surrounding transaction alive when the row
        // already exists; a plain duplicate-key error would abort it.
        let result = sqlx::query(
            r#"
            INSERT INTO journey_segments
                (journey_id, segment_order, rid, toc_code, origin_crs, destination_crs,
                 scheduled_departure, scheduled_arrival)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (journey_id, segment_order) DO NOTHING
            "#,
        )
        .bind(segment.journey_id.0)
        .bind(segment.segment_order)
        .bind(&segment.rid)
        .bind(&segment.toc_code)
        .bind(&segment.origin_crs)
        .bind(&segment.destination_crs)
        .bind(segment.scheduled_departure)
        .bind(segment.scheduled_arrival)
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::InfrastructureError {
            message: format!("Failed to insert journey segment in transaction: {}", e),
        })?;

        Ok(result.rows_affected() > 0)
    }
}
