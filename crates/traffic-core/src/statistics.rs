// File: crates/traffic-core/src/statistics.rs
// Summary: In-memory per-location car count history and the traffic measure derived from it.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::observation::Observation;

/// Car counts recorded per camera location, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct StatisticsStore {
    entries: HashMap<String, Vec<Observation>>,
}

impl StatisticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: &str, timestamp: DateTime<Utc>, count: i64) -> Result<()> {
        if count < 0 {
            return Err(Error::NegativeCount { location: location.to_string(), count });
        }
        self.entries
            .entry(location.to_string())
            .or_default()
            .push(Observation::new(timestamp, count));
        Ok(())
    }

    pub fn series(&self, location: &str) -> &[Observation] {
        self.entries.get(location).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Observations with `start <= timestamp <= end`.
    pub fn range(&self, location: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Observation> {
        self.series(location)
            .iter()
            .filter(|o| o.timestamp >= start && o.timestamp <= end)
            .copied()
            .collect()
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The attribute payload the host attaches: a JSON string of `[["<time>", n], ...]`.
    pub fn payload(&self, location: &str) -> String {
        let rows: Vec<(String, i64)> = self
            .series(location)
            .iter()
            .map(|o| (o.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true), o.count))
            .collect();
        // a Vec of (String, i64) always serializes
        serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    /// Measure `current` against everything recorded for `location`.
    pub fn measure(&self, location: &str, current: i64) -> TrafficMeasure {
        let counts: Vec<i64> = self.series(location).iter().map(|o| o.count).collect();
        classify(&counts, current)
    }
}

/// How busy a camera is compared to its own history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficMeasure {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl TrafficMeasure {
    pub fn label(self) -> &'static str {
        match self {
            TrafficMeasure::Unknown => "unknown",
            TrafficMeasure::Low => "low",
            TrafficMeasure::Medium => "medium",
            TrafficMeasure::High => "high",
            TrafficMeasure::Critical => "critical",
        }
    }
}

/// Percentile rank of `current` within `history`.
///
/// Repeated values take the middle of their run. A value not present in the
/// history ranks at its insertion position.
pub fn classify(history: &[i64], current: i64) -> TrafficMeasure {
    if history.is_empty() {
        return TrafficMeasure::Unknown;
    }
    let mut sorted = history.to_vec();
    sorted.sort_unstable();
    let first = sorted.partition_point(|&v| v < current);
    let occurrences = sorted.partition_point(|&v| v <= current) - first;
    let percent = (first as f64 + occurrences as f64 / 2.0) / sorted.len() as f64;

    if percent > 0.9 {
        TrafficMeasure::Critical
    } else if percent > 0.7 {
        TrafficMeasure::High
    } else if percent > 0.5 {
        TrafficMeasure::Medium
    } else {
        TrafficMeasure::Low
    }
}
