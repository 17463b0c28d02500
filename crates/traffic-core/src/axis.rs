// File: crates/traffic-core/src/axis.rs
// Summary: Axis model with labels, ranges and an optional time unit for tick spacing.

use crate::window::TimeUnit;

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    /// Set on time axes; values are unix seconds.
    pub unit: Option<TimeUnit>,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, unit: None }
    }

    pub fn time(label: impl Into<String>, min: f64, max: f64, unit: TimeUnit) -> Self {
        Self { unit: Some(unit), ..Self::new(label, min, max) }
    }
}
