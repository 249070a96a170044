//! Journey Events NATS Consumer
//!
//! Subscribes to the journey lifecycle topics via a durable JetStream pull
//! consumer, decodes and validates each message, resolves its correlation
//! id, and dispatches it to the ingest handler.
//!
//! Dispatcher contract: every failure category is logged and the consumer
//! moves on. One poisoned message never stops processing of the next, and
//! nothing thrown by a handler escapes the message loop.

use async_nats::jetstream::consumer::pull::Config as PullConsumerConfig;
use async_nats::jetstream::consumer::{AckPolicy, DeliverPolicy};
use async_nats::jetstream::stream::{Config as StreamConfig, RetentionPolicy};
use async_nats::jetstream::Context as JetStreamContext;
use async_nats::Client;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use railside_domain::ingest::{validate, ApplyOutcome, IngestPayload, JourneyIngestHandler};
use railside_domain::shared_kernel::DomainError;
use railside_shared::config::ConsumerConfig;
use railside_shared::event_topics::{journey_topics, JOURNEY_EVENTS_STREAM};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use super::correlation::resolve_correlation_id;

/// Configuration for the journey events consumer
#[derive(Debug, Clone)]
pub struct JourneyEventsConsumerConfig {
    /// Durable consumer name
    pub consumer_name: String,

    /// Stream holding the inbound journey events
    pub stream_name: String,

    /// Subjects the stream captures
    pub subjects: Vec<String>,

    /// Ack wait before JetStream redelivers an unacked message
    pub ack_wait: Duration,

    /// Maximum delivery attempts per message
    pub max_deliver: i64,

    /// How long to keep draining in-flight messages on shutdown
    pub drain_timeout: Duration,
}

impl Default for JourneyEventsConsumerConfig {
    fn default() -> Self {
        Self {
            consumer_name: "journey-ingest".to_string(),
            stream_name: JOURNEY_EVENTS_STREAM.to_string(),
            subjects: journey_topics::ALL.iter().map(|s| s.to_string()).collect(),
            ack_wait: Duration::from_secs(30),
            max_deliver: 3,
            drain_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&ConsumerConfig> for JourneyEventsConsumerConfig {
    fn from(config: &ConsumerConfig) -> Self {
        Self {
            consumer_name: config.name.clone(),
            ack_wait: Duration::from_secs(config.ack_wait_secs),
            max_deliver: config.max_deliver,
            drain_timeout: Duration::from_secs(config.drain_timeout_secs),
            ..Default::default()
        }
    }
}

/// Processed/error counters exposed for operational visibility.
///
/// There is no synchronous caller to return errors to; these counters and
/// the structured logs are the whole observability surface.
#[derive(Debug, Default)]
pub struct ConsumerStats {
    processed: AtomicU64,
    errors: AtomicU64,
    created: AtomicU64,
    confirmed: AtomicU64,
    segments_confirmed: AtomicU64,
    last_processed: RwLock<Option<DateTime<Utc>>>,
}

impl ConsumerStats {
    fn record_success(&self, topic: &str) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        match topic {
            journey_topics::CREATED => self.created.fetch_add(1, Ordering::Relaxed),
            journey_topics::CONFIRMED => self.confirmed.fetch_add(1, Ordering::Relaxed),
            journey_topics::SEGMENTS_CONFIRMED => {
                self.segments_confirmed.fetch_add(1, Ordering::Relaxed)
            }
            _ => 0,
        };
        if let Ok(mut last) = self.last_processed.write() {
            *last = Some(Utc::now());
        }
    }

    fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ConsumerStatsSnapshot {
        ConsumerStatsSnapshot {
            processed: self.processed.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            confirmed: self.confirmed.load(Ordering::Relaxed),
            segments_confirmed: self.segments_confirmed.load(Ordering::Relaxed),
            last_processed: self.last_processed.read().ok().and_then(|l| *l),
        }
    }
}

/// Point-in-time view of the consumer counters
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ConsumerStatsSnapshot {
    pub processed: u64,
    pub errors: u64,
    pub created: u64,
    pub confirmed: u64,
    pub segments_confirmed: u64,
    pub last_processed: Option<DateTime<Utc>>,
}

/// Decodes, validates, and dispatches one message body.
///
/// Holds no broker state; the consumer owns the JetStream plumbing and
/// hands each delivered message here.
pub struct MessageProcessor<H> {
    handler: Arc<H>,
    stats: Arc<ConsumerStats>,
}

impl<H> MessageProcessor<H>
where
    H: JourneyIngestHandler,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            stats: Arc::new(ConsumerStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<ConsumerStats> {
        Arc::clone(&self.stats)
    }

    /// Decode, validate, and dispatch one message.
    ///
    /// Never returns an error: every failure category ends in a log entry
    /// and an error-counter bump so the loop can ack and move on.
    pub async fn process(
        &self,
        topic: &str,
        headers: Option<&async_nats::HeaderMap>,
        payload: &[u8],
    ) {
        let body: serde_json::Value = match serde_json::from_slice(payload) {
            Ok(body) => body,
            Err(e) => {
                let excerpt = String::from_utf8_lossy(&payload[..payload.len().min(256)]);
                error!(
                    topic,
                    body = %excerpt,
                    "Failed to decode message body: {}",
                    e
                );
                self.stats.record_error();
                return;
            }
        };

        let payload_correlation_id = body.get("correlation_id").and_then(|v| v.as_str());
        let correlation_id = resolve_correlation_id(headers, payload_correlation_id);

        let validated = match validate::validate_for_topic(topic, &body) {
            Ok(validated) => validated,
            Err(failure) => {
                error!(
                    topic,
                    correlation_id = %correlation_id,
                    "Validation failed: {}",
                    failure
                );
                self.stats.record_error();
                return;
            }
        };

        let journey_id = validated.journey_id();
        debug!(
            topic,
            journey_id = %journey_id,
            correlation_id = %correlation_id,
            "Dispatching validated event"
        );

        let outcome = match validated {
            IngestPayload::JourneyCreated(p) => {
                self.handler.on_journey_created(p, &correlation_id).await
            }
            IngestPayload::JourneyConfirmed(p) => {
                self.handler.on_journey_confirmed(p, &correlation_id).await
            }
            IngestPayload::SegmentsConfirmed(p) => {
                self.handler.on_segments_confirmed(p, &correlation_id).await
            }
        };

        match outcome {
            Ok(ApplyOutcome::Applied { journey_id }) => {
                self.stats.record_success(topic);
                info!(
                    topic,
                    journey_id = %journey_id,
                    correlation_id = %correlation_id,
                    "Event applied"
                );
            }
            Ok(ApplyOutcome::AlreadyApplied { journey_id, detail }) => {
                self.stats.record_success(topic);
                warn!(
                    topic,
                    journey_id = %journey_id,
                    correlation_id = %correlation_id,
                    "Event already applied: {}",
                    detail
                );
            }
            Ok(ApplyOutcome::Rejected { journey_id, reason }) => {
                self.stats.record_error();
                error!(
                    topic,
                    journey_id = %journey_id,
                    correlation_id = %correlation_id,
                    "Event rejected: {}",
                    reason
                );
            }
            Err(e) => {
                self.stats.record_error();
                error!(
                    topic,
                    journey_id = %journey_id,
                    correlation_id = %correlation_id,
                    "Event handling failed: {}",
                    e
                );
            }
        }
    }
}

/// Journey Events Consumer
///
/// Owns the dispatcher lifecycle: one instance constructed at startup,
/// started once, stopped via the shutdown signal. Shutdown stops intake,
/// drains in-flight messages for the configured timeout, then exits the
/// loop so the caller can disconnect the transport.
pub struct JourneyEventsConsumer<H>
where
    H: JourneyIngestHandler + 'static,
{
    _client: Client,
    jetstream: JetStreamContext,
    processor: MessageProcessor<H>,
    config: JourneyEventsConsumerConfig,
    started: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
}

impl<H> JourneyEventsConsumer<H>
where
    H: JourneyIngestHandler + 'static,
{
    pub fn new(
        client: Client,
        jetstream: JetStreamContext,
        handler: Arc<H>,
        config: Option<JourneyEventsConsumerConfig>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            _client: client,
            jetstream,
            processor: MessageProcessor::new(handler),
            config: config.unwrap_or_default(),
            started: AtomicBool::new(false),
            shutdown_tx,
        }
    }

    pub fn stats(&self) -> Arc<ConsumerStats> {
        self.processor.stats()
    }

    /// Start the consumer and process messages until shutdown.
    ///
    /// When no external receiver is given, shutdown is driven by [`stop`].
    ///
    /// [`stop`]: JourneyEventsConsumer::stop
    pub async fn start(
        &self,
        shutdown_rx: Option<broadcast::Receiver<()>>,
    ) -> Result<(), DomainError> {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!(
                "🚆 JourneyEventsConsumer: Consumer '{}' already started, ignoring",
                self.config.consumer_name
            );
            return Ok(());
        }

        info!(
            "🚆 JourneyEventsConsumer: Starting consumer '{}'",
            self.config.consumer_name
        );

        let stream_name = {
            let mut stream = self.ensure_stream().await?;
            let stream_info =
                stream
                    .info()
                    .await
                    .map_err(|e| DomainError::InfrastructureError {
                        message: format!("Failed to get stream info: {}", e),
                    })?;
            stream_info.config.name.clone()
        };

        let consumer = self.create_or_get_consumer(&stream_name).await?;

        let mut messages =
            consumer
                .messages()
                .await
                .map_err(|e| DomainError::InfrastructureError {
                    message: format!("Failed to create consumer stream: {}", e),
                })?;

        info!(
            "🚆 JourneyEventsConsumer: Started consuming from stream '{}'",
            stream_name
        );

        let mut shutdown_rx = shutdown_rx.unwrap_or_else(|| self.shutdown_tx.subscribe());

        loop {
            tokio::select! {
                signal = shutdown_rx.recv() => {
                    match signal {
                        Ok(()) | Err(broadcast::error::RecvError::Closed) => {
                            info!(
                                "🚆 JourneyEventsConsumer: Shutdown signal received, starting drain phase"
                            );
                        }
                        Err(broadcast::error::RecvError::Lagged(_)) => {
                            info!("🚆 JourneyEventsConsumer: Receiver lagged, entering drain phase");
                        }
                    }
                    self.drain(&mut messages).await;
                    break;
                }
                message_result = messages.next() => {
                    match message_result {
                        Some(Ok(message)) => {
                            self.handle_message(&message).await;
                        }
                        Some(Err(e)) => {
                            error!("🚆 JourneyEventsConsumer: Message receive error: {}", e);
                        }
                        None => {
                            warn!("🚆 JourneyEventsConsumer: Message stream ended");
                            break;
                        }
                    }
                }
            }
        }

        info!("🚆 JourneyEventsConsumer: Consumer stopped");
        Ok(())
    }

    /// Finish messages JetStream has already delivered, bounded by the drain
    /// timeout. Anything left unacked is redelivered after ack_wait.
    async fn drain<S, E>(&self, messages: &mut S)
    where
        S: futures::Stream<Item = Result<async_nats::jetstream::Message, E>> + Unpin,
        E: std::fmt::Display,
    {
        let deadline = tokio::time::Instant::now() + self.config.drain_timeout;
        loop {
            match tokio::time::timeout_at(deadline, messages.next()).await {
                Ok(Some(Ok(message))) => {
                    self.handle_message(&message).await;
                }
                Ok(Some(Err(e))) => {
                    error!(
                        "🚆 JourneyEventsConsumer: Message receive error during drain: {}, exiting",
                        e
                    );
                    break;
                }
                Ok(None) => break,
                Err(_) => {
                    info!("🚆 JourneyEventsConsumer: Drain window elapsed");
                    break;
                }
            }
        }
    }

    async fn handle_message(&self, message: &async_nats::jetstream::Message) {
        self.processor
            .process(
                message.subject.as_str(),
                message.headers.as_ref(),
                &message.payload,
            )
            .await;

        if let Err(e) = message.ack().await {
            error!("🚆 JourneyEventsConsumer: Failed to ack message: {}", e);
        }
    }

    /// Stop the consumer gracefully.
    pub fn stop(&self) {
        if !self.started.load(Ordering::SeqCst) {
            warn!("🚆 JourneyEventsConsumer: Stop requested but consumer was never started");
            return;
        }
        let _ = self.shutdown_tx.send(());
        info!("🚆 JourneyEventsConsumer: Stop signal sent");
    }

    async fn ensure_stream(&self) -> Result<async_nats::jetstream::stream::Stream, DomainError> {
        let stream_name = self.config.stream_name.clone();

        match self.jetstream.get_stream(&stream_name).await {
            Ok(stream) => {
                debug!(
                    "🚆 JourneyEventsConsumer: Stream '{}' already exists",
                    stream_name
                );
                Ok(stream)
            }
            Err(_) => {
                let stream = self
                    .jetstream
                    .create_stream(StreamConfig {
                        name: stream_name.clone(),
                        subjects: self.config.subjects.clone(),
                        retention: RetentionPolicy::WorkQueue,
                        max_messages: 100_000,
                        max_bytes: 100 * 1024 * 1024,
                        ..Default::default()
                    })
                    .await
                    .map_err(|e| DomainError::InfrastructureError {
                        message: format!("Failed to create stream {}: {}", stream_name, e),
                    })?;

                info!("🚆 JourneyEventsConsumer: Created stream '{}'", stream_name);
                Ok(stream)
            }
        }
    }

    async fn create_or_get_consumer(
        &self,
        stream_name: &str,
    ) -> Result<async_nats::jetstream::consumer::PullConsumer, DomainError> {
        let consumer_name = self.config.consumer_name.clone();

        let stream = self.jetstream.get_stream(stream_name).await.map_err(|e| {
            DomainError::InfrastructureError {
                message: format!("Failed to get stream {}: {}", stream_name, e),
            }
        })?;

        match stream.get_consumer(&consumer_name).await {
            Ok(consumer) => {
                debug!(
                    "🚆 JourneyEventsConsumer: Consumer '{}' already exists",
                    consumer_name
                );
                Ok(consumer)
            }
            Err(_) => {
                let consumer_config = PullConsumerConfig {
                    durable_name: Some(consumer_name.clone()),
                    deliver_policy: DeliverPolicy::All,
                    ack_policy: AckPolicy::Explicit,
                    ack_wait: self.config.ack_wait,
                    max_deliver: self.config.max_deliver,
                    ..Default::default()
                };

                let consumer = stream.create_consumer(consumer_config).await.map_err(|e| {
                    DomainError::InfrastructureError {
                        message: format!("Failed to create consumer {}: {}", consumer_name, e),
                    }
                })?;

                info!(
                    "🚆 JourneyEventsConsumer: Created consumer '{}'",
                    consumer_name
                );
                Ok(consumer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use railside_domain::ingest::{
        JourneyConfirmedPayload, JourneyCreatedPayload, SegmentsConfirmedPayload,
    };
    use railside_domain::shared_kernel::{CorrelationId, JourneyId, Result as DomainResult};
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn config_default_values() {
        let config = JourneyEventsConsumerConfig::default();
        assert_eq!(config.consumer_name, "journey-ingest");
        assert_eq!(config.stream_name, JOURNEY_EVENTS_STREAM);
        assert_eq!(config.subjects.len(), 3);
        assert_eq!(config.max_deliver, 3);
        assert_eq!(config.drain_timeout, Duration::from_secs(10));
    }

    #[test]
    fn config_from_service_consumer_config() {
        let service_config = ConsumerConfig {
            name: "ingest-staging".to_string(),
            ack_wait_secs: 45,
            max_deliver: 5,
            drain_timeout_secs: 20,
        };
        let config = JourneyEventsConsumerConfig::from(&service_config);
        assert_eq!(config.consumer_name, "ingest-staging");
        assert_eq!(config.ack_wait, Duration::from_secs(45));
        assert_eq!(config.max_deliver, 5);
        assert_eq!(config.drain_timeout, Duration::from_secs(20));
        assert_eq!(config.stream_name, JOURNEY_EVENTS_STREAM);
    }

    #[test]
    fn stats_track_per_topic_counts() {
        let stats = ConsumerStats::default();
        stats.record_success(journey_topics::CREATED);
        stats.record_success(journey_topics::CREATED);
        stats.record_success(journey_topics::SEGMENTS_CONFIRMED);
        stats.record_error();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.processed, 3);
        assert_eq!(snapshot.errors, 1);
        assert_eq!(snapshot.created, 2);
        assert_eq!(snapshot.confirmed, 0);
        assert_eq!(snapshot.segments_confirmed, 1);
        assert!(snapshot.last_processed.is_some());
    }

    /// Scripted stand-in for the aggregate writer: records which operation
    /// was invoked and answers with a fixed outcome.
    struct ScriptedHandler {
        outcome: ScriptedOutcome,
        calls: Mutex<Vec<&'static str>>,
    }

    enum ScriptedOutcome {
        Applied,
        AlreadyApplied,
        Rejected,
        Fail,
    }

    impl ScriptedHandler {
        fn answering(outcome: ScriptedOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn respond(&self, journey_id: JourneyId) -> DomainResult<ApplyOutcome> {
            match self.outcome {
                ScriptedOutcome::Applied => Ok(ApplyOutcome::Applied { journey_id }),
                ScriptedOutcome::AlreadyApplied => Ok(ApplyOutcome::AlreadyApplied {
                    journey_id,
                    detail: "journey already stored".to_string(),
                }),
                ScriptedOutcome::Rejected => Ok(ApplyOutcome::Rejected {
                    journey_id,
                    reason: "cannot confirm a cancelled journey".to_string(),
                }),
                ScriptedOutcome::Fail => Err(DomainError::InfrastructureError {
                    message: "connection reset".to_string(),
                }),
            }
        }
    }

    #[async_trait]
    impl JourneyIngestHandler for ScriptedHandler {
        async fn on_journey_created(
            &self,
            payload: JourneyCreatedPayload,
            _correlation_id: &CorrelationId,
        ) -> DomainResult<ApplyOutcome> {
            self.calls.lock().unwrap().push("created");
            self.respond(payload.journey_id)
        }

        async fn on_journey_confirmed(
            &self,
            payload: JourneyConfirmedPayload,
            _correlation_id: &CorrelationId,
        ) -> DomainResult<ApplyOutcome> {
            self.calls.lock().unwrap().push("confirmed");
            self.respond(payload.journey_id)
        }

        async fn on_segments_confirmed(
            &self,
            payload: SegmentsConfirmedPayload,
            _correlation_id: &CorrelationId,
        ) -> DomainResult<ApplyOutcome> {
            self.calls.lock().unwrap().push("segments_confirmed");
            self.respond(payload.journey_id)
        }
    }

    fn created_body() -> serde_json::Value {
        json!({
            "journey_id": "6f1f5e7e-8c2a-4d0e-9b3f-0a1b2c3d4e5f",
            "user_id": "8a9b0c1d-2e3f-4a5b-8c7d-6e5f4a3b2c1d",
            "origin_crs": "PAD",
            "destination_crs": "CDF",
            "departure_datetime": "2026-02-09T09:05:00+00:00",
            "arrival_datetime": "2026-02-09T11:10:00+00:00",
            "journey_type": "single",
            "legs": []
        })
    }

    fn confirmed_body() -> serde_json::Value {
        json!({
            "journey_id": "6f1f5e7e-8c2a-4d0e-9b3f-0a1b2c3d4e5f",
            "user_id": "8a9b0c1d-2e3f-4a5b-8c7d-6e5f4a3b2c1d",
            "confirmed_at": "2026-02-09T08:00:00+00:00"
        })
    }

    fn segments_body() -> serde_json::Value {
        json!({
            "journey_id": "6f1f5e7e-8c2a-4d0e-9b3f-0a1b2c3d4e5f",
            "user_id": "8a9b0c1d-2e3f-4a5b-8c7d-6e5f4a3b2c1d",
            "confirmed_at": "2026-02-09T08:00:00+00:00",
            "segments": [{
                "segment_id": "0b1c2d3e-4f5a-4b6c-8d7e-9f0a1b2c3d4e",
                "segment_order": 1,
                "rid": "202602098022803",
                "toc_code": "GW",
                "origin_crs": "PAD",
                "destination_crs": "CDF",
                "scheduled_departure": "2026-02-09T09:05:00+00:00",
                "scheduled_arrival": "2026-02-09T11:10:00+00:00"
            }]
        })
    }

    async fn feed(processor: &MessageProcessor<ScriptedHandler>, topic: &str, body: &serde_json::Value) {
        processor.process(topic, None, body.to_string().as_bytes()).await;
    }

    #[tokio::test]
    async fn processor_routes_each_topic_to_its_handler_op() {
        let handler = ScriptedHandler::answering(ScriptedOutcome::Applied);
        let processor = MessageProcessor::new(Arc::clone(&handler));

        feed(&processor, journey_topics::CREATED, &created_body()).await;
        feed(&processor, journey_topics::CONFIRMED, &confirmed_body()).await;
        feed(&processor, journey_topics::SEGMENTS_CONFIRMED, &segments_body()).await;

        assert_eq!(handler.calls(), vec!["created", "confirmed", "segments_confirmed"]);
        let snapshot = processor.stats().snapshot();
        assert_eq!(snapshot.processed, 3);
        assert_eq!(snapshot.errors, 0);
        assert_eq!(snapshot.created, 1);
        assert_eq!(snapshot.confirmed, 1);
        assert_eq!(snapshot.segments_confirmed, 1);
    }

    #[tokio::test]
    async fn processor_counts_undecodable_body_without_dispatching() {
        let handler = ScriptedHandler::answering(ScriptedOutcome::Applied);
        let processor = MessageProcessor::new(Arc::clone(&handler));

        processor
            .process(journey_topics::CREATED, None, b"not even json{{")
            .await;

        assert!(handler.calls().is_empty());
        let snapshot = processor.stats().snapshot();
        assert_eq!(snapshot.processed, 0);
        assert_eq!(snapshot.errors, 1);
    }

    #[tokio::test]
    async fn processor_counts_validation_failure_without_dispatching() {
        let handler = ScriptedHandler::answering(ScriptedOutcome::Applied);
        let processor = MessageProcessor::new(Arc::clone(&handler));

        // Well-formed JSON, but missing every required field
        feed(&processor, journey_topics::CREATED, &json!({"unexpected": true})).await;

        assert!(handler.calls().is_empty());
        assert_eq!(processor.stats().snapshot().errors, 1);
    }

    #[tokio::test]
    async fn processor_rejects_unhandled_topic() {
        let handler = ScriptedHandler::answering(ScriptedOutcome::Applied);
        let processor = MessageProcessor::new(Arc::clone(&handler));

        feed(&processor, "journey.cancelled", &confirmed_body()).await;

        assert!(handler.calls().is_empty());
        assert_eq!(processor.stats().snapshot().errors, 1);
    }

    #[tokio::test]
    async fn processor_counts_already_applied_as_processed() {
        let handler = ScriptedHandler::answering(ScriptedOutcome::AlreadyApplied);
        let processor = MessageProcessor::new(handler);

        feed(&processor, journey_topics::CONFIRMED, &confirmed_body()).await;

        let snapshot = processor.stats().snapshot();
        assert_eq!(snapshot.processed, 1);
        assert_eq!(snapshot.confirmed, 1);
        assert_eq!(snapshot.errors, 0);
    }

    #[tokio::test]
    async fn processor_counts_rejection_as_error() {
        let handler = ScriptedHandler::answering(ScriptedOutcome::Rejected);
        let processor = MessageProcessor::new(handler);

        feed(&processor, journey_topics::CONFIRMED, &confirmed_body()).await;

        let snapshot = processor.stats().snapshot();
        assert_eq!(snapshot.processed, 0);
        assert_eq!(snapshot.errors, 1);
    }

    #[tokio::test]
    async fn processor_counts_handler_failure_as_error() {
        let handler = ScriptedHandler::answering(ScriptedOutcome::Fail);
        let processor = MessageProcessor::new(handler);

        feed(&processor, journey_topics::SEGMENTS_CONFIRMED, &segments_body()).await;

        let snapshot = processor.stats().snapshot();
        assert_eq!(snapshot.processed, 0);
        assert_eq!(snapshot.errors, 1);
    }
}
