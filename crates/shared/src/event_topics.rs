//! Centralized event topic constants for NATS JetStream
//!
//! Single source of truth for every subject this service subscribes to or
//! announces on, preventing mismatches between producers and consumers.

/// Stream holding the inbound journey lifecycle events
pub const JOURNEY_EVENTS_STREAM: &str = "RAILSIDE_JOURNEY_EVENTS";

/// Inbound journey lifecycle topics
pub mod journey_topics {

    /// A journey was created (optionally carrying planned legs)
    pub const CREATED: &str = "journey.created";
    /// A draft journey was confirmed by its owner
    pub const CONFIRMED: &str = "journey.confirmed";
    /// Resolved segments were confirmed for a journey
    pub const SEGMENTS_CONFIRMED: &str = "segments.confirmed";

    /// All topics the ingestion consumer subscribes to
    pub const ALL: [&str; 3] = [CREATED, CONFIRMED, SEGMENTS_CONFIRMED];
}

/// Outbox event types announced to downstream consumers
pub mod outbox_event_types {

    /// A journey is confirmed with its full segment set; consumed by delay
    /// correlation and eligibility evaluation
    pub const JOURNEY_CONFIRMED: &str = "journey.confirmed";
}
