// File: crates/traffic-core/src/aggregate.rs
// Summary: Series aggregation (trailing window filter, time bucketing, rounded mean per bucket).

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Offset, SecondsFormat, Utc};
use serde::Serialize;

use crate::observation::Observation;
use crate::window::{BucketWidth, TimeUnit, Window};

/// Reduced value of one bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AggregatedPoint {
    pub bucket_start: DateTime<Utc>,
    pub value: i64,
}

/// Point shape the chart consumes: ISO-8601 UTC string and integer value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: i64,
}

/// Output of one aggregation run, ordered by ascending bucket start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aggregation {
    pub window: Window,
    pub points: Vec<AggregatedPoint>,
}

#[derive(Serialize)]
struct ChartPayload<'a> {
    unit: TimeUnit,
    data: &'a [ChartPoint],
}

impl Aggregation {
    pub fn unit(&self) -> TimeUnit {
        self.window.unit()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.points
            .iter()
            .map(|p| ChartPoint {
                x: p.bucket_start.to_rfc3339_opts(SecondsFormat::Millis, true),
                y: p.value,
            })
            .collect()
    }

    /// `{"unit": "...", "data": [{"x": "...", "y": n}, ...]}`
    pub fn to_chart_json(&self) -> serde_json::Result<String> {
        let data = self.chart_points();
        serde_json::to_string(&ChartPayload { unit: self.unit(), data: &data })
    }
}

/// Mean of `sum / len`, rounded to the nearest integer with ties toward +inf.
///
/// `len == 0` yields 0.
pub fn round_half_up_mean(sum: i128, len: usize) -> i64 {
    if len == 0 {
        return 0;
    }
    let n = len as i128;
    // floor((sum / n) + 1/2) in integers
    (2 * sum + n).div_euclid(2 * n) as i64
}

/// Truncate `ts` to the start of its bucket, measured in the wall clock of `offset`.
pub fn truncate(ts: DateTime<Utc>, width: BucketWidth, offset: FixedOffset) -> DateTime<Utc> {
    let span = match width {
        BucketWidth::Ungrouped => return ts,
        BucketWidth::Seconds(n) => n,
    };
    let local = ts.with_timezone(&offset).naive_local();
    let midnight = local.date().and_time(NaiveTime::MIN);
    let since_midnight = (local - midnight).num_seconds();
    let start = midnight + Duration::seconds(since_midnight - since_midnight.rem_euclid(span));
    start.and_utc() - Duration::seconds(i64::from(offset.local_minus_utc()))
}

#[derive(Default)]
struct Bucket {
    sum: i128,
    len: usize,
}

impl Bucket {
    fn push(&mut self, count: i64) {
        self.sum += i128::from(count);
        self.len += 1;
    }

    fn value(&self) -> i64 {
        round_half_up_mean(self.sum, self.len)
    }
}

/// Aggregate `raw` for `window` as of `now`, bucketing on UTC wall-clock boundaries.
pub fn aggregate(raw: &[Observation], window: Window, now: DateTime<Utc>) -> Aggregation {
    aggregate_with_offset(raw, window, now, utc_offset())
}

/// Same as [`aggregate`] with bucket boundaries taken in the wall clock of `offset`.
///
/// Observations at or before `now - lookback` are dropped; the input needs no ordering.
/// A look-back reaching past the earliest representable instant keeps everything.
///
/// The offset is fixed for the whole window: a zone that changes offset for
/// daylight saving shifts its local midnights by the DST delta on the far side
/// of the transition, so callers wanting civil days across a Week/Month/Year
/// window should pass the offset in effect at `now`.
pub fn aggregate_with_offset(
    raw: &[Observation],
    window: Window,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Aggregation {
    let cutoff = now.checked_sub_signed(window.lookback());
    let width = window.bucket_width();

    let mut buckets: BTreeMap<DateTime<Utc>, Bucket> = BTreeMap::new();
    for o in raw.iter().filter(|o| cutoff.map_or(true, |c| o.timestamp > c)) {
        buckets.entry(truncate(o.timestamp, width, offset)).or_default().push(o.count);
    }

    let points = buckets
        .into_iter()
        .map(|(bucket_start, b)| AggregatedPoint { bucket_start, value: b.value() })
        .collect();
    Aggregation { window, points }
}

pub(crate) fn utc_offset() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up_mean(80, 4), 20);
        assert_eq!(round_half_up_mean(5, 2), 3); // 2.5
        assert_eq!(round_half_up_mean(7, 2), 4); // 3.5
        assert_eq!(round_half_up_mean(7, 3), 2); // 2.33
        assert_eq!(round_half_up_mean(5, 3), 2); // 1.67
        assert_eq!(round_half_up_mean(-5, 2), -2); // -2.5 rounds toward +inf
        assert_eq!(round_half_up_mean(-7, 2), -3); // -3.5
        assert_eq!(round_half_up_mean(0, 0), 0);
    }

    #[test]
    fn truncates_to_half_hours() {
        let t = utc("2023-11-13T08:44:59.900Z");
        assert_eq!(truncate(t, BucketWidth::Seconds(1800), utc_offset()), utc("2023-11-13T08:30:00Z"));
        let t = utc("2023-11-13T08:29:59Z");
        assert_eq!(truncate(t, BucketWidth::Seconds(1800), utc_offset()), utc("2023-11-13T08:00:00Z"));
    }

    #[test]
    fn truncates_to_four_hours_and_days() {
        let t = utc("2023-11-13T23:59:00Z");
        assert_eq!(truncate(t, BucketWidth::Seconds(4 * 3600), utc_offset()), utc("2023-11-13T20:00:00Z"));
        assert_eq!(truncate(t, BucketWidth::Seconds(86_400), utc_offset()), utc("2023-11-13T00:00:00Z"));
    }

    #[test]
    fn truncation_follows_local_midnight() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        // 00:30 local is still 2023-11-13 locally
        let t = utc("2023-11-12T23:30:00Z");
        assert_eq!(truncate(t, BucketWidth::Seconds(86_400), cet), utc("2023-11-12T23:00:00Z"));
        // 4h slots start at local 00, 04, 08...
        let t = utc("2023-11-13T06:10:00Z"); // 07:10 local
        assert_eq!(truncate(t, BucketWidth::Seconds(4 * 3600), cet), utc("2023-11-13T03:00:00Z"));
    }

    #[test]
    fn ungrouped_keeps_raw_timestamp() {
        let t = utc("2023-11-13T08:44:59.123Z");
        assert_eq!(truncate(t, BucketWidth::Ungrouped, utc_offset()), t);
    }

    #[test]
    fn truncation_is_idempotent() {
        let t = utc("2023-06-30T17:52:41Z");
        for w in Window::ALL {
            let once = truncate(t, w.bucket_width(), utc_offset());
            assert_eq!(truncate(once, w.bucket_width(), utc_offset()), once, "{w}");
        }
    }

    #[test]
    fn lookback_before_the_earliest_instant_keeps_everything() {
        let now = DateTime::<Utc>::MIN_UTC + Duration::days(2) + Duration::hours(12);
        let raw = [Observation::new(now - Duration::hours(1), 6), Observation::new(now, 2)];
        let agg = aggregate(&raw, Window::Year, now);
        assert_eq!(agg.points.iter().map(|p| p.value).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn fixed_offset_keeps_one_midnight_all_year() {
        // the same offset in winter and summer: no DST shift of day boundaries
        let cet = FixedOffset::east_opt(3600).unwrap();
        let day = BucketWidth::Seconds(86_400);
        assert_eq!(truncate(utc("2023-01-15T12:00:00Z"), day, cet), utc("2023-01-14T23:00:00Z"));
        assert_eq!(truncate(utc("2023-07-15T12:00:00Z"), day, cet), utc("2023-07-14T23:00:00Z"));
    }

    #[test]
    fn chart_points_use_millisecond_iso_strings() {
        let agg = Aggregation {
            window: Window::Day,
            points: vec![AggregatedPoint { bucket_start: utc("2023-11-13T08:30:00Z"), value: 4 }],
        };
        assert_eq!(agg.chart_points(), vec![ChartPoint { x: "2023-11-13T08:30:00.000Z".into(), y: 4 }]);
        assert_eq!(
            agg.to_chart_json().unwrap(),
            r#"{"unit":"hour","data":[{"x":"2023-11-13T08:30:00.000Z","y":4}]}"#
        );
    }
}
