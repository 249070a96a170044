//! NATS JetStream messaging: the inbound event dispatcher and correlation
//! id propagation.

pub mod correlation;
pub mod journey_consumer;

pub use correlation::{resolve_correlation_id, CORRELATION_ID_HEADER};
pub use journey_consumer::{
    ConsumerStats, ConsumerStatsSnapshot, JourneyEventsConsumer, JourneyEventsConsumerConfig,
    MessageProcessor,
};
