//! Journey aggregate and its repository contracts.

use crate::shared_kernel::{JourneyId, JourneyStatus, Result, UserId};
use crate::transaction::PgTransaction;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a journey is one-way or a return trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyKind {
    Single,
    Return,
}

impl JourneyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyKind::Single => "single",
            JourneyKind::Return => "return",
        }
    }
}

impl fmt::Display for JourneyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JourneyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "single" => Ok(JourneyKind::Single),
            "return" => Ok(JourneyKind::Return),
            other => Err(format!("unknown journey kind: {}", other)),
        }
    }
}

/// One user's planned trip.
///
/// The id is externally supplied; this pipeline never generates journey ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub id: JourneyId,
    pub user_id: UserId,
    pub origin_crs: String,
    pub destination_crs: String,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub kind: JourneyKind,
    pub status: JourneyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One directly-operated leg of a journey.
///
/// `rid` is the Darwin running identifier; it is absent for non-rail legs
/// such as walking transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneySegment {
    pub journey_id: JourneyId,
    /// 1-based position within the journey's segment set
    pub segment_order: i32,
    pub rid: Option<String>,
    pub toc_code: Option<String>,
    pub origin_crs: String,
    pub destination_crs: String,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
}

/// Pool-level read access to journeys.
#[async_trait]
pub trait JourneyRepository: Send + Sync {
    async fn find_by_id(&self, journey_id: &JourneyId) -> Result<Option<Journey>>;

    async fn list_segments(&self, journey_id: &JourneyId) -> Result<Vec<JourneySegment>>;
}

/// Transactional write access to journeys.
///
/// Each method executes against a caller-owned transaction so one ingest
/// recipe can combine several writes with the outbox insert atomically.
#[async_trait]
pub trait JourneyRepositoryTx: Send + Sync {
    /// Insert the journey, or refresh its mutable fields on conflict.
    /// The stored status is never overwritten by an upsert. Returns the row
    /// as persisted, which can differ from the input on replay: a journey
    /// whose status has advanced keeps its stored status.
    async fn upsert_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey: &Journey,
    ) -> Result<Journey>;

    async fn find_by_id_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey_id: &JourneyId,
    ) -> Result<Option<Journey>>;

    async fn update_status_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey_id: &JourneyId,
        status: JourneyStatus,
    ) -> Result<()>;

    /// Drop any stored segment set for the journey and insert the given one.
    async fn replace_segments_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        journey_id: &JourneyId,
        segments: &[JourneySegment],
    ) -> Result<()>;

    /// Insert one segment, tolerating a `(journey_id, segment_order)`
    /// duplicate. Returns `false` when the row already existed.
    async fn insert_segment_with_tx(
        &self,
        tx: &mut PgTransaction<'_>,
        segment: &JourneySegment,
    ) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journey_kind_round_trips() {
        assert_eq!("single".parse::<JourneyKind>().unwrap(), JourneyKind::Single);
        assert_eq!("return".parse::<JourneyKind>().unwrap(), JourneyKind::Return);
        assert_eq!(JourneyKind::Return.as_str(), "return");
    }

    #[test]
    fn journey_kind_rejects_unknown() {
        assert!("open-return".parse::<JourneyKind>().is_err());
    }

    #[test]
    fn journey_kind_serde_uses_lowercase() {
        let json = serde_json::to_string(&JourneyKind::Return).unwrap();
        assert_eq!(json, "\"return\"");
        let kind: JourneyKind = serde_json::from_str("\"single\"").unwrap();
        assert_eq!(kind, JourneyKind::Single);
    }
}
