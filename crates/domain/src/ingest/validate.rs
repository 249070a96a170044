//! Per-topic payload validation.
//!
//! Pure functions: each takes the decoded JSON body for one topic and
//! returns either a fully-typed payload or a structured failure naming every
//! offending field. Validation never raises; the dispatcher skips the
//! database write entirely on failure.

use crate::ingest::payloads::{
    IngestPayload, JourneyConfirmedPayload, JourneyCreatedPayload, LegPayload, SegmentPayload,
    SegmentsConfirmedPayload,
};
use crate::journeys::JourneyKind;
use crate::shared_kernel::{JourneyId, UserId};
use chrono::{DateTime, FixedOffset, NaiveTime};
use railside_shared::event_topics::journey_topics;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// One field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A semantically invalid payload: every violation found, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub topic: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} payload: ", self.topic)?;
        let mut first = true;
        for violation in &self.violations {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Validate a decoded body against the schema for `topic`.
///
/// Returns an unknown-topic failure for subjects this service does not
/// handle; the dispatcher only subscribes to the three known ones, so that
/// path indicates a stream misconfiguration.
pub fn validate_for_topic(topic: &str, body: &Value) -> Result<IngestPayload, ValidationFailure> {
    match topic {
        journey_topics::CREATED => validate_journey_created(body).map(IngestPayload::JourneyCreated),
        journey_topics::CONFIRMED => {
            validate_journey_confirmed(body).map(IngestPayload::JourneyConfirmed)
        }
        journey_topics::SEGMENTS_CONFIRMED => {
            validate_segments_confirmed(body).map(IngestPayload::SegmentsConfirmed)
        }
        _ => Err(ValidationFailure {
            topic: "unknown",
            violations: vec![FieldViolation::new("topic", format!("unhandled topic: {}", topic))],
        }),
    }
}

/// Validate a `journey.created` body.
pub fn validate_journey_created(
    body: &Value,
) -> Result<JourneyCreatedPayload, ValidationFailure> {
    let mut checker = Checker::new(journey_topics::CREATED, body)?;

    let journey_id = checker.uuid("journey_id");
    let user_id = checker.uuid("user_id");
    let origin_crs = checker.crs("origin_crs");
    let destination_crs = checker.crs("destination_crs");
    let departure_datetime = checker.timestamp("departure_datetime");
    let arrival_datetime = checker.timestamp("arrival_datetime");
    let journey_type = checker.journey_kind("journey_type");
    let correlation_id = checker.optional_string("correlation_id");

    let legs = match checker.body.get("legs") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(raw_legs)) => {
            let mut legs = Vec::with_capacity(raw_legs.len());
            for (index, raw) in raw_legs.iter().enumerate() {
                if let Some(leg) = checker.leg(index, raw) {
                    legs.push(leg);
                }
            }
            legs
        }
        Some(_) => {
            checker.violation("legs", "must be an array");
            Vec::new()
        }
    };

    checker.finish()?;

    Ok(JourneyCreatedPayload {
        journey_id: JourneyId(journey_id.unwrap_or_default()),
        user_id: UserId(user_id.unwrap_or_default()),
        origin_crs: origin_crs.unwrap_or_default(),
        destination_crs: destination_crs.unwrap_or_default(),
        departure_datetime: departure_datetime.unwrap_or_else(epoch),
        arrival_datetime: arrival_datetime.unwrap_or_else(epoch),
        journey_type: journey_type.unwrap_or(JourneyKind::Single),
        correlation_id,
        legs,
    })
}

/// Validate a `journey.confirmed` body.
pub fn validate_journey_confirmed(
    body: &Value,
) -> Result<JourneyConfirmedPayload, ValidationFailure> {
    let mut checker = Checker::new(journey_topics::CONFIRMED, body)?;

    let journey_id = checker.uuid("journey_id");
    let user_id = checker.uuid("user_id");
    let confirmed_at = checker.timestamp("confirmed_at");
    let correlation_id = checker.optional_string("correlation_id");

    checker.finish()?;

    Ok(JourneyConfirmedPayload {
        journey_id: JourneyId(journey_id.unwrap_or_default()),
        user_id: UserId(user_id.unwrap_or_default()),
        confirmed_at: confirmed_at.unwrap_or_else(epoch),
        correlation_id,
    })
}

/// Validate a `segments.confirmed` body.
pub fn validate_segments_confirmed(
    body: &Value,
) -> Result<SegmentsConfirmedPayload, ValidationFailure> {
    let mut checker = Checker::new(journey_topics::SEGMENTS_CONFIRMED, body)?;

    let journey_id = checker.uuid("journey_id");
    let user_id = checker.uuid("user_id");
    let confirmed_at = checker.timestamp("confirmed_at");
    let correlation_id = checker.optional_string("correlation_id");

    let segments = match checker.body.get("segments") {
        Some(Value::Array(raw_segments)) if !raw_segments.is_empty() => {
            let mut segments = Vec::with_capacity(raw_segments.len());
            for (index, raw) in raw_segments.iter().enumerate() {
                if let Some(segment) = checker.segment(index, raw) {
                    segments.push(segment);
                }
            }
            // 1-based, strictly sequential, no gaps
            for (index, segment) in segments.iter().enumerate() {
                let expected = (index + 1) as i32;
                if segment.segment_order != expected {
                    checker.violation(
                        format!("segments[{}].segment_order", index),
                        format!("expected {}, got {}", expected, segment.segment_order),
                    );
                }
            }
            segments
        }
        Some(Value::Array(_)) => {
            checker.violation("segments", "must not be empty");
            Vec::new()
        }
        None | Some(Value::Null) => {
            checker.violation("segments", "is required");
            Vec::new()
        }
        Some(_) => {
            checker.violation("segments", "must be an array");
            Vec::new()
        }
    };

    checker.finish()?;

    Ok(SegmentsConfirmedPayload {
        journey_id: JourneyId(journey_id.unwrap_or_default()),
        user_id: UserId(user_id.unwrap_or_default()),
        segments,
        confirmed_at: confirmed_at.unwrap_or_else(epoch),
        correlation_id,
    })
}

/// Field-by-field extractor accumulating violations so one message can
/// report everything wrong with it at once.
struct Checker<'a> {
    topic: &'static str,
    body: &'a Value,
    violations: Vec<FieldViolation>,
}

impl<'a> Checker<'a> {
    fn new(topic: &'static str, body: &'a Value) -> Result<Self, ValidationFailure> {
        if body.is_object() {
            Ok(Self {
                topic,
                body,
                violations: Vec::new(),
            })
        } else {
            Err(ValidationFailure {
                topic,
                violations: vec![FieldViolation::new("body", "must be a JSON object")],
            })
        }
    }

    fn violation(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    fn finish(self) -> Result<(), ValidationFailure> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure {
                topic: self.topic,
                violations: self.violations,
            })
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        match self.body.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::String(_)) => {
                self.violation(field, "must not be empty");
                None
            }
            Some(_) => {
                self.violation(field, "must be a string");
                None
            }
            None => {
                self.violation(field, "is required");
                None
            }
        }
    }

    fn optional_string(&mut self, field: &str) -> Option<String> {
        match self.body.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    fn uuid(&mut self, field: &str) -> Option<Uuid> {
        let raw = self.string(field)?;
        match Uuid::parse_str(&raw) {
            Ok(uuid) => Some(uuid),
            Err(_) => {
                self.violation(field, "must be a UUID");
                None
            }
        }
    }

    fn crs(&mut self, field: &str) -> Option<String> {
        let raw = self.string(field)?;
        if is_crs(&raw) {
            Some(raw)
        } else {
            self.violation(field, "must be exactly 3 uppercase letters");
            None
        }
    }

    fn timestamp(&mut self, field: &str) -> Option<DateTime<FixedOffset>> {
        let raw = self.string(field)?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(ts) => Some(ts),
            Err(_) => {
                self.violation(field, "must be ISO-8601 with an explicit offset");
                None
            }
        }
    }

    fn journey_kind(&mut self, field: &str) -> Option<JourneyKind> {
        let raw = self.string(field)?;
        match raw.parse::<JourneyKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                self.violation(field, "must be one of: single, return");
                None
            }
        }
    }

    fn leg(&mut self, index: usize, raw: &Value) -> Option<LegPayload> {
        let prefix = format!("legs[{}]", index);
        let Some(obj) = raw.as_object() else {
            self.violation(&prefix, "must be an object");
            return None;
        };

        let from = self.nested_crs(&prefix, obj, "from");
        let to = self.nested_crs(&prefix, obj, "to");
        let departure = self.nested_clock_time(&prefix, obj, "departure");
        let arrival = self.nested_clock_time(&prefix, obj, "arrival");
        let operator = self.nested_string(&prefix, obj, "operator");
        let trip_id = obj
            .get("tripId")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string());

        Some(LegPayload {
            from: from?,
            to: to?,
            departure: departure?,
            arrival: arrival?,
            operator: operator?,
            trip_id,
        })
    }

    fn segment(&mut self, index: usize, raw: &Value) -> Option<SegmentPayload> {
        let prefix = format!("segments[{}]", index);
        let Some(obj) = raw.as_object() else {
            self.violation(&prefix, "must be an object");
            return None;
        };

        let segment_id = match self.nested_string(&prefix, obj, "segment_id") {
            Some(raw_id) => match Uuid::parse_str(&raw_id) {
                Ok(uuid) => Some(uuid),
                Err(_) => {
                    self.violation(format!("{}.segment_id", prefix), "must be a UUID");
                    None
                }
            },
            None => None,
        };

        let segment_order = match obj.get("segment_order") {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(order) if (1..=i32::MAX as i64).contains(&order) => Some(order as i32),
                _ => {
                    self.violation(
                        format!("{}.segment_order", prefix),
                        format!("must be between 1 and {}", i32::MAX),
                    );
                    None
                }
            },
            Some(_) => {
                self.violation(format!("{}.segment_order", prefix), "must be an integer");
                None
            }
            None => {
                self.violation(format!("{}.segment_order", prefix), "is required");
                None
            }
        };

        let rid = obj
            .get("rid")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string());

        let toc_code = match self.nested_string(&prefix, obj, "toc_code") {
            Some(code) if is_toc(&code) => Some(code),
            Some(_) => {
                self.violation(
                    format!("{}.toc_code", prefix),
                    "must be exactly 2 uppercase letters",
                );
                None
            }
            None => None,
        };

        let origin_crs = self.nested_crs(&prefix, obj, "origin_crs");
        let destination_crs = self.nested_crs(&prefix, obj, "destination_crs");
        let scheduled_departure = self.nested_timestamp(&prefix, obj, "scheduled_departure");
        let scheduled_arrival = self.nested_timestamp(&prefix, obj, "scheduled_arrival");

        Some(SegmentPayload {
            segment_id: segment_id?,
            segment_order: segment_order?,
            rid,
            toc_code: toc_code?,
            origin_crs: origin_crs?,
            destination_crs: destination_crs?,
            scheduled_departure: scheduled_departure?,
            scheduled_arrival: scheduled_arrival?,
        })
    }

    fn nested_string(
        &mut self,
        prefix: &str,
        obj: &serde_json::Map<String, Value>,
        field: &str,
    ) -> Option<String> {
        match obj.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(_) => {
                self.violation(format!("{}.{}", prefix, field), "must be a non-empty string");
                None
            }
            None => {
                self.violation(format!("{}.{}", prefix, field), "is required");
                None
            }
        }
    }

    fn nested_crs(
        &mut self,
        prefix: &str,
        obj: &serde_json::Map<String, Value>,
        field: &str,
    ) -> Option<String> {
        let raw = self.nested_string(prefix, obj, field)?;
        if is_crs(&raw) {
            Some(raw)
        } else {
            self.violation(
                format!("{}.{}", prefix, field),
                "must be exactly 3 uppercase letters",
            );
            None
        }
    }

    fn nested_clock_time(
        &mut self,
        prefix: &str,
        obj: &serde_json::Map<String, Value>,
        field: &str,
    ) -> Option<NaiveTime> {
        let raw = self.nested_string(prefix, obj, field)?;
        parse_clock_time(&raw).or_else(|| {
            self.violation(
                format!("{}.{}", prefix, field),
                "must be a clock time (HH:MM or HH:MM:SS)",
            );
            None
        })
    }

    fn nested_timestamp(
        &mut self,
        prefix: &str,
        obj: &serde_json::Map<String, Value>,
        field: &str,
    ) -> Option<DateTime<FixedOffset>> {
        let raw = self.nested_string(prefix, obj, field)?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(ts) => Some(ts),
            Err(_) => {
                self.violation(
                    format!("{}.{}", prefix, field),
                    "must be ISO-8601 with an explicit offset",
                );
                None
            }
        }
    }
}

// Placeholder for fields that already recorded a violation; `finish` has
// returned the error before these values can be observed.
fn epoch() -> DateTime<FixedOffset> {
    DateTime::UNIX_EPOCH.fixed_offset()
}

fn is_crs(s: &str) -> bool {
    s.len() == 3 && s.chars().all(|c| c.is_ascii_uppercase())
}

fn is_toc(s: &str) -> bool {
    s.len() == 2 && s.chars().all(|c| c.is_ascii_uppercase())
}

fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn created_body() -> Value {
        json!({
            "journey_id": "6f1f5e7e-8c2a-4d0e-9b3f-0a1b2c3d4e5f",
            "user_id": "8a9b0c1d-2e3f-4a5b-8c7d-6e5f4a3b2c1d",
            "origin_crs": "PAD",
            "destination_crs": "CDF",
            "departure_datetime": "2026-02-09T09:05:00+00:00",
            "arrival_datetime": "2026-02-09T11:10:00+00:00",
            "journey_type": "single",
            "correlation_id": "corr-123",
            "legs": [
                {
                    "from": "PAD",
                    "to": "CDF",
                    "departure": "09:05",
                    "arrival": "11:10",
                    "operator": "1:GW",
                    "tripId": "1:202602098022803"
                }
            ]
        })
    }

    #[test]
    fn accepts_valid_journey_created() {
        let payload = validate_journey_created(&created_body()).unwrap();
        assert_eq!(payload.origin_crs, "PAD");
        assert_eq!(payload.journey_type, JourneyKind::Single);
        assert_eq!(payload.legs.len(), 1);
        assert_eq!(payload.legs[0].operator, "1:GW");
        assert_eq!(payload.legs[0].trip_id.as_deref(), Some("1:202602098022803"));
        assert_eq!(payload.correlation_id.as_deref(), Some("corr-123"));
    }

    #[test]
    fn accepts_journey_created_without_legs() {
        let mut body = created_body();
        body.as_object_mut().unwrap().remove("legs");
        let payload = validate_journey_created(&body).unwrap();
        assert!(payload.legs.is_empty());
    }

    #[test]
    fn leg_without_trip_ref_is_valid() {
        let mut body = created_body();
        body["legs"][0].as_object_mut().unwrap().remove("tripId");
        let payload = validate_journey_created(&body).unwrap();
        assert_eq!(payload.legs[0].trip_id, None);
    }

    #[test]
    fn rejects_missing_required_fields() {
        let body = json!({"journey_id": "6f1f5e7e-8c2a-4d0e-9b3f-0a1b2c3d4e5f"});
        let failure = validate_journey_created(&body).unwrap_err();
        let fields: Vec<&str> = failure.violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"user_id"));
        assert!(fields.contains(&"origin_crs"));
        assert!(fields.contains(&"departure_datetime"));
        assert!(fields.contains(&"journey_type"));
    }

    #[test]
    fn rejects_lowercase_crs() {
        let mut body = created_body();
        body["origin_crs"] = json!("pad");
        let failure = validate_journey_created(&body).unwrap_err();
        assert!(failure.violations.iter().any(|v| v.field == "origin_crs"));
    }

    #[test]
    fn rejects_four_letter_crs() {
        let mut body = created_body();
        body["destination_crs"] = json!("CDFF");
        assert!(validate_journey_created(&body).is_err());
    }

    #[test]
    fn rejects_timestamp_without_offset() {
        let mut body = created_body();
        body["departure_datetime"] = json!("2026-02-09T09:05:00");
        let failure = validate_journey_created(&body).unwrap_err();
        assert!(failure
            .violations
            .iter()
            .any(|v| v.field == "departure_datetime" && v.message.contains("offset")));
    }

    #[test]
    fn rejects_unknown_journey_type() {
        let mut body = created_body();
        body["journey_type"] = json!("season");
        let failure = validate_journey_created(&body).unwrap_err();
        assert!(failure.violations.iter().any(|v| v.field == "journey_type"));
    }

    #[test]
    fn rejects_non_uuid_journey_id() {
        let mut body = created_body();
        body["journey_id"] = json!("J-001");
        let failure = validate_journey_created(&body).unwrap_err();
        assert!(failure.violations.iter().any(|v| v.field == "journey_id"));
    }

    #[test]
    fn rejects_non_object_body() {
        let failure = validate_journey_created(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(failure.violations[0].field, "body");
    }

    #[test]
    fn collects_multiple_violations_at_once() {
        let mut body = created_body();
        body["origin_crs"] = json!("pad");
        body["journey_type"] = json!("season");
        let failure = validate_journey_created(&body).unwrap_err();
        assert!(failure.violations.len() >= 2);
    }

    #[test]
    fn accepts_valid_journey_confirmed() {
        let body = json!({
            "journey_id": "6f1f5e7e-8c2a-4d0e-9b3f-0a1b2c3d4e5f",
            "user_id": "8a9b0c1d-2e3f-4a5b-8c7d-6e5f4a3b2c1d",
            "confirmed_at": "2026-02-01T12:00:00Z"
        });
        let payload = validate_journey_confirmed(&body).unwrap();
        assert_eq!(payload.correlation_id, None);
    }

    fn segments_body() -> Value {
        json!({
            "journey_id": "6f1f5e7e-8c2a-4d0e-9b3f-0a1b2c3d4e5f",
            "user_id": "8a9b0c1d-2e3f-4a5b-8c7d-6e5f4a3b2c1d",
            "confirmed_at": "2026-02-01T12:00:00Z",
            "segments": [
                {
                    "segment_id": "0b1c2d3e-4f5a-4b6c-8d7e-9f0a1b2c3d4e",
                    "segment_order": 1,
                    "rid": "202602098022803",
                    "toc_code": "GW",
                    "origin_crs": "PAD",
                    "destination_crs": "SWI",
                    "scheduled_departure": "2026-02-09T09:05:00+00:00",
                    "scheduled_arrival": "2026-02-09T09:52:00+00:00"
                },
                {
                    "segment_id": "1c2d3e4f-5a6b-4c7d-8e9f-0a1b2c3d4e5f",
                    "segment_order": 2,
                    "rid": null,
                    "toc_code": "GW",
                    "origin_crs": "SWI",
                    "destination_crs": "CDF",
                    "scheduled_departure": "2026-02-09T10:00:00+00:00",
                    "scheduled_arrival": "2026-02-09T11:10:00+00:00"
                }
            ]
        })
    }

    #[test]
    fn accepts_valid_segments_confirmed() {
        let payload = validate_segments_confirmed(&segments_body()).unwrap();
        assert_eq!(payload.segments.len(), 2);
        assert_eq!(payload.segments[0].rid.as_deref(), Some("202602098022803"));
        assert_eq!(payload.segments[1].rid, None);
    }

    #[test]
    fn rejects_empty_segment_list() {
        let mut body = segments_body();
        body["segments"] = json!([]);
        let failure = validate_segments_confirmed(&body).unwrap_err();
        assert!(failure
            .violations
            .iter()
            .any(|v| v.field == "segments" && v.message.contains("empty")));
    }

    #[test]
    fn rejects_missing_segment_list() {
        let mut body = segments_body();
        body.as_object_mut().unwrap().remove("segments");
        assert!(validate_segments_confirmed(&body).is_err());
    }

    #[test]
    fn rejects_order_gap() {
        let mut body = segments_body();
        body["segments"][1]["segment_order"] = json!(3);
        let failure = validate_segments_confirmed(&body).unwrap_err();
        assert!(failure
            .violations
            .iter()
            .any(|v| v.field == "segments[1].segment_order" && v.message.contains("expected 2")));
    }

    #[test]
    fn rejects_order_not_starting_at_one() {
        let mut body = segments_body();
        body["segments"][0]["segment_order"] = json!(2);
        body["segments"][1]["segment_order"] = json!(3);
        assert!(validate_segments_confirmed(&body).is_err());
    }

    #[test]
    fn rejects_zero_segment_order() {
        let mut body = segments_body();
        body["segments"][0]["segment_order"] = json!(0);
        let failure = validate_segments_confirmed(&body).unwrap_err();
        assert!(failure
            .violations
            .iter()
            .any(|v| v.field == "segments[0].segment_order"));
    }

    #[test]
    fn rejects_segment_order_beyond_i32_range() {
        // 4294967297 == (1 << 32) + 1; a plain `as i32` cast would fold it to 1
        let mut body = segments_body();
        body["segments"][0]["segment_order"] = json!(4_294_967_297i64);
        let failure = validate_segments_confirmed(&body).unwrap_err();
        assert!(failure
            .violations
            .iter()
            .any(|v| v.field == "segments[0].segment_order"));
    }

    #[test]
    fn rejects_one_letter_toc() {
        let mut body = segments_body();
        body["segments"][0]["toc_code"] = json!("G");
        let failure = validate_segments_confirmed(&body).unwrap_err();
        assert!(failure
            .violations
            .iter()
            .any(|v| v.field == "segments[0].toc_code"));
    }

    #[test]
    fn routes_by_topic() {
        let payload = validate_for_topic(journey_topics::CREATED, &created_body()).unwrap();
        assert!(matches!(payload, IngestPayload::JourneyCreated(_)));

        let payload =
            validate_for_topic(journey_topics::SEGMENTS_CONFIRMED, &segments_body()).unwrap();
        assert!(matches!(payload, IngestPayload::SegmentsConfirmed(_)));

        assert!(validate_for_topic("journey.deleted", &created_body()).is_err());
    }

    #[test]
    fn failure_display_names_fields() {
        let mut body = created_body();
        body["origin_crs"] = json!("pad");
        let failure = validate_journey_created(&body).unwrap_err();
        let rendered = failure.to_string();
        assert!(rendered.contains("journey.created"));
        assert!(rendered.contains("origin_crs"));
    }
}
