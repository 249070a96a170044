//! Correlation id resolution for inbound messages.
//!
//! Resolution order: transport header, then the payload's own
//! `correlation_id`, then a freshly generated identifier. Every log line for
//! a message carries the same resolved id.

use async_nats::HeaderMap;
use railside_shared::ids::CorrelationId;

/// Transport header carrying the correlation id end-to-end.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

pub fn resolve_correlation_id(
    headers: Option<&HeaderMap>,
    payload_correlation_id: Option<&str>,
) -> CorrelationId {
    if let Some(headers) = headers {
        if let Some(value) = headers.get(CORRELATION_ID_HEADER) {
            if let Some(id) = CorrelationId::from_string(value.as_str()) {
                return id;
            }
        }
    }

    if let Some(id) = payload_correlation_id.and_then(CorrelationId::from_string) {
        return id;
    }

    CorrelationId::generate()
}
