// File: crates/traffic-core/src/observation.rs
// Summary: Raw (timestamp, count) observations and decoding of the host's statistics payload.
// Notes:
// - The host attaches the series as a JSON string holding `[[time, count], ...]`.
// - Decoding never fails: a malformed payload is an empty series and malformed
//   entries are skipped one by one.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use serde_json::Value;

/// Car count measured at an instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub count: i64,
}

impl Observation {
    pub const fn new(timestamp: DateTime<Utc>, count: i64) -> Self {
        Self { timestamp, count }
    }

    /// Build from an epoch-seconds timestamp. Out-of-range input yields `None`.
    pub fn at_unix(secs: i64, count: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(|t| Self::new(t, count))
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse the timestamp forms the host records.
///
/// Accepts RFC 3339, the space separated `YYYY-MM-DD HH:MM:SS[.fff]+HH:MM`
/// form, and the same without an offset (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(raw, Utc.fix())
}

/// Like [`parse_timestamp`], but forms without an offset are wall-clock
/// times in `offset`.
pub fn parse_timestamp_in(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(t.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|t| t.with_timezone(&Utc))
}

fn timestamp_of(v: &Value, offset: FixedOffset) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => parse_timestamp_in(s, offset),
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

fn count_of(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
}

fn observation_of(entry: &Value, offset: FixedOffset) -> Option<Observation> {
    let pair = entry.as_array()?;
    if pair.len() < 2 {
        return None;
    }
    Some(Observation::new(timestamp_of(&pair[0], offset)?, count_of(&pair[1])?))
}

/// Parse JSON text, unwrapping one level of string encoding.
pub(crate) fn parse_payload(payload: &str) -> Option<Value> {
    let value: Value = serde_json::from_str(payload).ok()?;
    match value {
        Value::String(inner) => serde_json::from_str(&inner).ok(),
        other => Some(other),
    }
}

/// Decode a statistics payload into observations, keeping input order.
pub fn decode_series(payload: &str) -> Vec<Observation> {
    decode_series_in(payload, Utc.fix())
}

/// Decode with offset-less timestamps read as wall-clock times in `offset`.
pub fn decode_series_in(payload: &str, offset: FixedOffset) -> Vec<Observation> {
    match parse_payload(payload) {
        Some(v) => decode_series_value_in(&v, offset),
        None => {
            if !payload.trim().is_empty() {
                log::debug!("statistics payload is not JSON; treating as empty");
            }
            Vec::new()
        }
    }
}

/// Decode an already parsed payload (`[[time, count], ...]`).
pub fn decode_series_value(value: &Value) -> Vec<Observation> {
    decode_series_value_in(value, Utc.fix())
}

pub fn decode_series_value_in(value: &Value, offset: FixedOffset) -> Vec<Observation> {
    let Some(entries) = value.as_array() else {
        log::debug!("statistics payload is not an array; treating as empty");
        return Vec::new();
    };
    let out: Vec<Observation> = entries.iter().filter_map(|e| observation_of(e, offset)).collect();
    if out.len() != entries.len() {
        log::debug!("skipped {} malformed statistics entries", entries.len() - out.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn parses_recorded_timestamp_forms() {
        let want = utc("2023-11-13T08:04:05Z");
        assert_eq!(parse_timestamp("2023-11-13T08:04:05Z"), Some(want));
        assert_eq!(parse_timestamp("2023-11-13T09:04:05+01:00"), Some(want));
        assert_eq!(parse_timestamp("2023-11-13 08:04:05+00:00"), Some(want));
        assert_eq!(parse_timestamp("2023-11-13 08:04:05"), Some(want));
        assert_eq!(parse_timestamp("2023-11-13T08:04:05"), Some(want));
        assert_eq!(
            parse_timestamp("2023-11-13 08:04:05.250+00:00"),
            Some(utc("2023-11-13T08:04:05.250Z"))
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn decodes_string_encoded_payload() {
        let payload = r#"[["2023-01-01 12:00:00", 10], ["2023-01-01T12:30:00Z", 4]]"#;
        let obs = decode_series(payload);
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].count, 10);
        assert_eq!(obs[1].timestamp, utc("2023-01-01T12:30:00Z"));

        // attribute delivered as a JSON string holding the JSON array
        let wrapped = serde_json::to_string(payload).unwrap();
        assert_eq!(decode_series(&wrapped), obs);
    }

    #[test]
    fn malformed_payload_is_empty() {
        assert!(decode_series("").is_empty());
        assert!(decode_series("not json").is_empty());
        assert!(decode_series(r#"{"time": 1}"#).is_empty());
        assert!(decode_series("null").is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let payload = r#"[["2023-01-01 12:00:00", 1], ["bad", 2], [3], "x", ["2023-01-01 13:00:00", "7"], ["2023-01-01 14:00:00", 2.6]]"#;
        let obs = decode_series(payload);
        assert_eq!(obs.iter().map(|o| o.count).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn naive_times_follow_the_given_offset() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(parse_timestamp_in("2023-11-12 23:30:00", cet), Some(utc("2023-11-12T22:30:00Z")));
        // explicit offsets win over the local clock
        assert_eq!(parse_timestamp_in("2023-11-12T23:30:00Z", cet), Some(utc("2023-11-12T23:30:00Z")));
        let obs = decode_series_in(r#"[["2023-11-12 23:30:00", 4], [1700000000000, 1]]"#, cet);
        assert_eq!(obs[0].timestamp, utc("2023-11-12T22:30:00Z"));
        assert_eq!(obs[1], Observation::at_unix(1_700_000_000, 1).unwrap());
    }

    #[test]
    fn numeric_timestamps_are_epoch_millis() {
        let obs = decode_series("[[1700000000000, 5]]");
        assert_eq!(obs, vec![Observation::at_unix(1_700_000_000, 5).unwrap()]);
    }
}
