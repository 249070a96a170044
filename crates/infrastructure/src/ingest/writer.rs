//! Aggregate Writer
//!
//! Applies one validated event as one database transaction: the journey
//! write(s) and, for creation, the outbox row commit together or not at all.
//!
//! Idempotency is embedded in the write recipes themselves, no dedup store:
//! creation upserts on conflict, confirmation checks state before the
//! transition, segment confirmation tolerates duplicate keys.

use async_trait::async_trait;
use chrono::Utc;
use railside_domain::ingest::{
    derive, ApplyOutcome, JourneyConfirmedPayload, JourneyCreatedPayload, JourneyIngestHandler,
    SegmentsConfirmedPayload,
};
use railside_domain::journeys::{Journey, JourneyRepositoryTx, JourneySegment};
use railside_domain::outbox::{OutboxEventInsert, OutboxRepositoryTx};
use railside_domain::shared_kernel::{CorrelationId, DomainError, JourneyStatus, Result};
use railside_shared::event_topics::outbox_event_types;
use sqlx::PgPool;
use tracing::{info, warn};

/// Performs the atomic multi-row write for one event.
///
/// Generic over the repository contracts so the recipes can be exercised
/// against test doubles without a live database.
pub struct JourneyEventWriter<J, O>
where
    J: JourneyRepositoryTx,
    O: OutboxRepositoryTx,
{
    pool: PgPool,
    journeys: J,
    outbox: O,
}

impl<J, O> JourneyEventWriter<J, O>
where
    J: JourneyRepositoryTx,
    O: OutboxRepositoryTx,
{
    pub fn new(pool: PgPool, journeys: J, outbox: O) -> Self {
        Self {
            pool,
            journeys,
            outbox,
        }
    }

    fn segments_from_legs(payload: &JourneyCreatedPayload) -> Vec<JourneySegment> {
        payload
            .legs
            .iter()
            .enumerate()
            .map(|(idx, leg)| {
                let (scheduled_departure, scheduled_arrival) =
                    derive::leg_schedule(&payload.departure_datetime, leg.departure, leg.arrival);
                JourneySegment {
                    journey_id: payload.journey_id,
                    segment_order: idx as i32 + 1,
                    rid: derive::rid_from_trip_ref(leg.trip_id.as_deref()),
                    toc_code: Some(derive::toc_from_operator_ref(&leg.operator)),
                    origin_crs: leg.from.clone(),
                    destination_crs: leg.to.clone(),
                    scheduled_departure,
                    scheduled_arrival,
                }
            })
            .collect()
    }

    /// Self-contained announcement payload: downstream consumers read it
    /// without joining back into this service's tables.
    fn outbox_payload(
        journey: &Journey,
        segments: &[JourneySegment],
        correlation_id: &CorrelationId,
    ) -> serde_json::Value {
        let segment_views: Vec<serde_json::Value> = segments
            .iter()
            .map(|s| {
                serde_json::json!({
                    "segment_order": s.segment_order,
                    "rid": s.rid,
                    "toc_code": s.toc_code,
                    "origin_crs": s.origin_crs,
                    "destination_crs": s.destination_crs,
                    "scheduled_departure": s.scheduled_departure,
                    "scheduled_arrival": s.scheduled_arrival,
                })
            })
            .collect();

        serde_json::json!({
            "journey_id": journey.id,
            "user_id": journey.user_id,
            "origin_crs": journey.origin_crs,
            "destination_crs": journey.destination_crs,
            "departure_at": journey.departure_at,
            "arrival_at": journey.arrival_at,
            "journey_type": journey.kind,
            "status": journey.status,
            "toc_code": segments.first().and_then(|s| s.toc_code.clone()),
            "segments": segment_views,
            "correlation_id": correlation_id.as_str(),
        })
    }
}

fn tx_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError {
        message: format!("{}: {}", context, e),
    }
}

#[async_trait]
impl<J, O> JourneyIngestHandler for JourneyEventWriter<J, O>
where
    J: JourneyRepositoryTx,
    O: OutboxRepositoryTx,
{
    async fn on_journey_created(
        &self,
        payload: JourneyCreatedPayload,
        correlation_id: &CorrelationId,
    ) -> Result<ApplyOutcome> {
        let now = Utc::now();
        let journey = Journey {
            id: payload.journey_id,
            user_id: payload.user_id,
            origin_crs: payload.origin_crs.clone(),
            destination_crs: payload.destination_crs.clone(),
            departure_at: payload.departure_datetime.with_timezone(&Utc),
            arrival_at: payload.arrival_datetime.with_timezone(&Utc),
            kind: payload.journey_type,
            status: JourneyStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        let segments = Self::segments_from_legs(&payload);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| tx_error("Failed to begin transaction", e))?;

        let stored = self.journeys.upsert_with_tx(&mut tx, &journey).await?;

        // A creation without legs carries no segment set to replace; leaving
        // the stored segments alone keeps a zero-leg replay from wiping rows
        // written by a later segment confirmation.
        if !segments.is_empty() {
            self.journeys
                .replace_segments_with_tx(&mut tx, &stored.id, &segments)
                .await?;
        }

        let event = OutboxEventInsert::for_journey(
            *stored.id.as_uuid(),
            outbox_event_types::JOURNEY_CONFIRMED.to_string(),
            Self::outbox_payload(&stored, &segments, correlation_id),
            correlation_id.as_str().to_string(),
        );
        self.outbox
            .insert_with_tx(&mut tx, &event)
            .await
            .map_err(|e| DomainError::InfrastructureError {
                message: format!("Failed to insert outbox event: {}", e),
            })?;

        tx.commit()
            .await
            .map_err(|e| tx_error("Failed to commit journey creation", e))?;

        info!(
            journey_id = %stored.id,
            correlation_id = %correlation_id,
            segments = segments.len(),
            "Journey creation processed"
        );

        Ok(ApplyOutcome::Applied {
            journey_id: stored.id,
        })
    }

    async fn on_journey_confirmed(
        &self,
        payload: JourneyConfirmedPayload,
        correlation_id: &CorrelationId,
    ) -> Result<ApplyOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| tx_error("Failed to begin transaction", e))?;

        let journey = match self
            .journeys
            .find_by_id_with_tx(&mut tx, &payload.journey_id)
            .await?
        {
            Some(journey) => journey,
            None => {
                return Ok(ApplyOutcome::Rejected {
                    journey_id: payload.journey_id,
                    reason: "journey not found".to_string(),
                });
            }
        };

        if journey.user_id != payload.user_id {
            return Ok(ApplyOutcome::Rejected {
                journey_id: payload.journey_id,
                reason: format!(
                    "owner mismatch: stored user {}, payload user {}",
                    journey.user_id, payload.user_id
                ),
            });
        }

        if journey.status == JourneyStatus::Confirmed {
            return Ok(ApplyOutcome::AlreadyApplied {
                journey_id: journey.id,
                detail: "journey already confirmed".to_string(),
            });
        }

        if !journey.status.can_transition_to(&JourneyStatus::Confirmed) {
            return Ok(ApplyOutcome::Rejected {
                journey_id: journey.id,
                reason: format!("cannot confirm a {} journey", journey.status),
            });
        }

        self.journeys
            .update_status_with_tx(&mut tx, &journey.id, JourneyStatus::Confirmed)
            .await?;
        tx.commit()
            .await
            .map_err(|e| tx_error("Failed to commit journey confirmation", e))?;

        info!(
            journey_id = %journey.id,
            correlation_id = %correlation_id,
            "Journey confirmation processed"
        );

        Ok(ApplyOutcome::Applied {
            journey_id: journey.id,
        })
    }

    async fn on_segments_confirmed(
        &self,
        payload: SegmentsConfirmedPayload,
        correlation_id: &CorrelationId,
    ) -> Result<ApplyOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| tx_error("Failed to begin transaction", e))?;

        let journey = match self
            .journeys
            .find_by_id_with_tx(&mut tx, &payload.journey_id)
            .await?
        {
            Some(journey) => journey,
            None => {
                return Ok(ApplyOutcome::Rejected {
                    journey_id: payload.journey_id,
                    reason: "journey not found".to_string(),
                });
            }
        };

        if journey.status != JourneyStatus::Confirmed {
            return Ok(ApplyOutcome::Rejected {
                journey_id: journey.id,
                reason: format!(
                    "expected_status=confirmed, actual_status={}",
                    journey.status
                ),
            });
        }

        let mut inserted = 0usize;
        let mut duplicates = 0usize;
        for segment_payload in &payload.segments {
            let segment = JourneySegment {
                journey_id: journey.id,
                segment_order: segment_payload.segment_order,
                rid: segment_payload.rid.clone(),
                toc_code: Some(segment_payload.toc_code.clone()),
                origin_crs: segment_payload.origin_crs.clone(),
                destination_crs: segment_payload.destination_crs.clone(),
                scheduled_departure: segment_payload.scheduled_departure.with_timezone(&Utc),
                scheduled_arrival: segment_payload.scheduled_arrival.with_timezone(&Utc),
            };

            if self.journeys.insert_segment_with_tx(&mut tx, &segment).await? {
                inserted += 1;
            } else {
                duplicates += 1;
                warn!(
                    journey_id = %journey.id,
                    segment_order = segment.segment_order,
                    correlation_id = %correlation_id,
                    "Duplicate segment ignored"
                );
            }
        }

        tx.commit()
            .await
            .map_err(|e| tx_error("Failed to commit segment confirmation", e))?;

        info!(
            journey_id = %journey.id,
            correlation_id = %correlation_id,
            inserted,
            duplicates,
            "Segment confirmation processed"
        );

        if inserted == 0 && duplicates > 0 {
            Ok(ApplyOutcome::AlreadyApplied {
                journey_id: journey.id,
                detail: format!("all {} segments already present", duplicates),
            })
        } else {
            Ok(ApplyOutcome::Applied {
                journey_id: journey.id,
            })
        }
    }
}
