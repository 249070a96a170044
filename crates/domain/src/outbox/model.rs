//! Outbox Event Model
//!
//! Domain model for outbox events used in the Transactional Outbox Pattern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error types for outbox operations
#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event not found: {0}")]
    NotFound(Uuid),

    #[error("Infrastructure error: {message}")]
    InfrastructureError { message: String },
}

/// Type of aggregate an outbox event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateType {
    Journey,
}

impl std::fmt::Display for AggregateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateType::Journey => write!(f, "JOURNEY"),
        }
    }
}

/// An outbox event ready to be inserted into the database
///
/// The payload must be self-contained: downstream consumers read it without
/// joining back into this service's tables.
#[derive(Debug, Clone)]
pub struct OutboxEventInsert {
    pub aggregate_id: Uuid,
    pub aggregate_type: AggregateType,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub correlation_id: String,
}

impl OutboxEventInsert {
    /// Create a journey-related event
    pub fn for_journey(
        journey_id: Uuid,
        event_type: String,
        payload: serde_json::Value,
        correlation_id: String,
    ) -> Self {
        Self {
            aggregate_id: journey_id,
            aggregate_type: AggregateType::Journey,
            event_type,
            payload,
            correlation_id,
        }
    }
}

/// A view of an outbox event as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEventView {
    pub id: Uuid,
    pub aggregate_id: Uuid,
    pub aggregate_type: AggregateType,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub correlation_id: String,
    pub created_at: DateTime<Utc>,
    /// Mutated only by the external relay, never by this pipeline
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl OutboxEventView {
    pub fn is_pending(&self) -> bool {
        !self.published
    }
}
