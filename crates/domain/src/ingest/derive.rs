//! Derivation of segment fields from route-planner leg references.
//!
//! The planner prefixes identifiers with a numeric feed id
//! (`"<feed>:<value>"`); storage and downstream delay correlation want the
//! bare value.

use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, Utc};

/// Sentinel operating-company code for legs whose operator reference has no
/// feed prefix. Not assigned to any real operator, so downstream consumers
/// can recognize and skip it.
pub const UNKNOWN_TOC: &str = "ZZ";

/// Extract the Darwin running identifier from a leg's trip reference.
///
/// `"1:202602098022803"` → `Some("202602098022803")`. A reference without a
/// separator is taken as already being the RID. No reference (non-rail legs
/// such as walking transfers) → `None`, never the feed prefix.
pub fn rid_from_trip_ref(trip_ref: Option<&str>) -> Option<String> {
    let trip_ref = trip_ref?.trim();
    if trip_ref.is_empty() {
        return None;
    }
    match trip_ref.split_once(':') {
        Some((_feed, rid)) if !rid.is_empty() => Some(rid.to_string()),
        Some(_) => None,
        None => Some(trip_ref.to_string()),
    }
}

/// Extract the two-letter operating-company code from a leg's operator
/// reference, falling back to [`UNKNOWN_TOC`] when the reference is not
/// `"<feed>:<code>"` shaped.
pub fn toc_from_operator_ref(operator_ref: &str) -> String {
    match operator_ref.split_once(':') {
        Some((_feed, code)) if !code.is_empty() => code.to_string(),
        _ => UNKNOWN_TOC.to_string(),
    }
}

/// Combine the journey's travel date with a leg's local clock time, using
/// the travel timestamp's own UTC offset.
pub fn combine_travel_date(travel: &DateTime<FixedOffset>, clock: NaiveTime) -> DateTime<Utc> {
    let local = NaiveDateTime::new(travel.date_naive(), clock);
    let utc_naive = local - *travel.offset();
    DateTime::from_naive_utc_and_offset(utc_naive, Utc)
}

/// Scheduled departure and arrival for one leg. An arrival clock time
/// earlier than the departure rolls to the next day (overnight leg).
pub fn leg_schedule(
    travel: &DateTime<FixedOffset>,
    departure: NaiveTime,
    arrival: NaiveTime,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let dep = combine_travel_date(travel, departure);
    let mut arr = combine_travel_date(travel, arrival);
    if arr < dep {
        arr += chrono::Duration::days(1);
    }
    (dep, arr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn rid_strips_feed_prefix() {
        assert_eq!(
            rid_from_trip_ref(Some("1:202602098022803")).as_deref(),
            Some("202602098022803")
        );
    }

    #[test]
    fn missing_trip_ref_yields_none_not_feed_prefix() {
        assert_eq!(rid_from_trip_ref(None), None);
        assert_eq!(rid_from_trip_ref(Some("")), None);
        assert_eq!(rid_from_trip_ref(Some("   ")), None);
    }

    #[test]
    fn unprefixed_trip_ref_is_taken_as_rid() {
        assert_eq!(
            rid_from_trip_ref(Some("202602098022803")).as_deref(),
            Some("202602098022803")
        );
    }

    #[test]
    fn trip_ref_with_empty_suffix_yields_none() {
        assert_eq!(rid_from_trip_ref(Some("1:")), None);
    }

    #[test]
    fn toc_strips_feed_prefix() {
        assert_eq!(toc_from_operator_ref("1:GW"), "GW");
    }

    #[test]
    fn malformed_operator_ref_falls_back_to_sentinel() {
        assert_eq!(toc_from_operator_ref("GW"), UNKNOWN_TOC);
        assert_eq!(toc_from_operator_ref(""), UNKNOWN_TOC);
        assert_eq!(toc_from_operator_ref("1:"), UNKNOWN_TOC);
    }

    #[test]
    fn combines_clock_time_with_travel_date_and_offset() {
        let travel = DateTime::parse_from_rfc3339("2026-06-09T00:00:00+01:00").unwrap();
        let clock = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        let combined = combine_travel_date(&travel, clock);
        // 09:05 at +01:00 is 08:05 UTC
        assert_eq!(combined.hour(), 8);
        assert_eq!(combined.minute(), 5);
        assert_eq!(combined.date_naive(), travel.date_naive());
    }

    #[test]
    fn overnight_arrival_rolls_to_next_day() {
        let travel = DateTime::parse_from_rfc3339("2026-02-09T00:00:00+00:00").unwrap();
        let dep = NaiveTime::from_hms_opt(23, 40, 0).unwrap();
        let arr = NaiveTime::from_hms_opt(0, 55, 0).unwrap();
        let (dep_ts, arr_ts) = leg_schedule(&travel, dep, arr);
        assert!(arr_ts > dep_ts);
        assert_eq!(arr_ts.date_naive(), dep_ts.date_naive().succ_opt().unwrap());
    }

    #[test]
    fn daytime_leg_keeps_same_day() {
        let travel = DateTime::parse_from_rfc3339("2026-02-09T00:00:00+00:00").unwrap();
        let dep = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        let arr = NaiveTime::from_hms_opt(11, 10, 0).unwrap();
        let (dep_ts, arr_ts) = leg_schedule(&travel, dep, arr);
        assert_eq!(dep_ts.date_naive(), arr_ts.date_naive());
    }
}
