//! Inbound event ingestion: typed payloads, validation, and the handler
//! contract the message dispatcher drives.

pub mod derive;
pub mod payloads;
pub mod validate;

pub use payloads::{
    IngestPayload, JourneyConfirmedPayload, JourneyCreatedPayload, LegPayload, SegmentPayload,
    SegmentsConfirmedPayload,
};
pub use validate::{FieldViolation, ValidationFailure};

use crate::shared_kernel::{CorrelationId, JourneyId, Result};
use async_trait::async_trait;

/// Result of applying one validated event.
///
/// Handler failures are values: the dispatcher owns the final
/// log-and-continue translation, nothing here panics or throws past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The event mutated the database (and, for creation, wrote its outbox row)
    Applied { journey_id: JourneyId },
    /// The event had already been applied; nothing was written
    AlreadyApplied { journey_id: JourneyId, detail: String },
    /// A business rule rejected the event; nothing was written
    Rejected { journey_id: JourneyId, reason: String },
}

/// The three ingest operations, one per subscribed topic.
///
/// Implementations must be atomic per event: either the whole write recipe
/// commits or none of it does.
#[async_trait]
pub trait JourneyIngestHandler: Send + Sync {
    async fn on_journey_created(
        &self,
        payload: JourneyCreatedPayload,
        correlation_id: &CorrelationId,
    ) -> Result<ApplyOutcome>;

    async fn on_journey_confirmed(
        &self,
        payload: JourneyConfirmedPayload,
        correlation_id: &CorrelationId,
    ) -> Result<ApplyOutcome>;

    async fn on_segments_confirmed(
        &self,
        payload: SegmentsConfirmedPayload,
        correlation_id: &CorrelationId,
    ) -> Result<ApplyOutcome>;
}
