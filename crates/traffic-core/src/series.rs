// File: crates/traffic-core/src/series.rs
// Summary: Line series model fed from aggregated points (x = unix seconds, y = car count).

use crate::aggregate::Aggregation;

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub data_xy: Vec<(f64, f64)>, // ascending x
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), data_xy: Vec::new() }
    }

    pub fn with_data(label: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { label: label.into(), data_xy: data }
    }

    /// One point per bucket, in bucket order.
    pub fn from_aggregation(label: impl Into<String>, agg: &Aggregation) -> Self {
        let data = agg
            .points
            .iter()
            .map(|p| (p.bucket_start.timestamp() as f64, p.value as f64))
            .collect();
        Self::with_data(label, data)
    }

    pub fn is_empty(&self) -> bool {
        self.data_xy.is_empty()
    }

    /// (min, max) over y, `None` for an empty series.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.data_xy.iter().fold(None, |acc, &(_, y)| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }

    /// (first, last) x; data is ordered.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        Some((self.data_xy.first()?.0, self.data_xy.last()?.0))
    }
}
