//! Typed inbound payloads.
//!
//! These are produced only by the validator; nothing downstream of it sees
//! untyped JSON.

use crate::journeys::JourneyKind;
use crate::shared_kernel::{JourneyId, UserId};
use chrono::{DateTime, FixedOffset, NaiveTime};
use uuid::Uuid;

/// Tagged union of the three per-topic payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestPayload {
    JourneyCreated(JourneyCreatedPayload),
    JourneyConfirmed(JourneyConfirmedPayload),
    SegmentsConfirmed(SegmentsConfirmedPayload),
}

/// `journey.created`: a journey was planned, optionally with its legs.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyCreatedPayload {
    pub journey_id: JourneyId,
    pub user_id: UserId,
    pub origin_crs: String,
    pub destination_crs: String,
    /// Timezone-aware; the offset also anchors leg clock times
    pub departure_datetime: DateTime<FixedOffset>,
    pub arrival_datetime: DateTime<FixedOffset>,
    pub journey_type: JourneyKind,
    pub correlation_id: Option<String>,
    pub legs: Vec<LegPayload>,
}

/// One leg as supplied by the route planner. May be rail or a non-rail
/// transfer; only rail legs carry a trip reference.
#[derive(Debug, Clone, PartialEq)]
pub struct LegPayload {
    pub from: String,
    pub to: String,
    /// Local clock time on the journey's travel date
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
    /// Raw operator reference, `"<feed>:<code>"` shaped when well-formed
    pub operator: String,
    /// Raw trip reference, `"<feed>:<rid>"` shaped; absent for non-rail legs
    pub trip_id: Option<String>,
}

/// `journey.confirmed`: a draft journey was confirmed by its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyConfirmedPayload {
    pub journey_id: JourneyId,
    pub user_id: UserId,
    pub confirmed_at: DateTime<FixedOffset>,
    pub correlation_id: Option<String>,
}

/// `segments.confirmed`: fully resolved segments for a confirmed journey.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentsConfirmedPayload {
    pub journey_id: JourneyId,
    pub user_id: UserId,
    pub segments: Vec<SegmentPayload>,
    pub confirmed_at: DateTime<FixedOffset>,
    pub correlation_id: Option<String>,
}

/// A resolved segment carried by `segments.confirmed`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPayload {
    pub segment_id: Uuid,
    /// 1-based, strictly sequential within the event
    pub segment_order: i32,
    pub rid: Option<String>,
    pub toc_code: String,
    pub origin_crs: String,
    pub destination_crs: String,
    pub scheduled_departure: DateTime<FixedOffset>,
    pub scheduled_arrival: DateTime<FixedOffset>,
}

impl IngestPayload {
    /// The journey the payload refers to, for log tagging.
    pub fn journey_id(&self) -> JourneyId {
        match self {
            IngestPayload::JourneyCreated(p) => p.journey_id,
            IngestPayload::JourneyConfirmed(p) => p.journey_id,
            IngestPayload::SegmentsConfirmed(p) => p.journey_id,
        }
    }

    /// The payload's own correlation id, if the producer supplied one.
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            IngestPayload::JourneyCreated(p) => p.correlation_id.as_deref(),
            IngestPayload::JourneyConfirmed(p) => p.correlation_id.as_deref(),
            IngestPayload::SegmentsConfirmed(p) => p.correlation_id.as_deref(),
        }
    }
}
