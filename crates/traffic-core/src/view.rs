// File: crates/traffic-core/src/view.rs
// Visible ranges for a time chart: x spans the data (or the window), y always starts at zero.

use chrono::{DateTime, Utc};

use crate::series::Series;
use crate::window::Window;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Autoscale to the series. An empty series gets a unit box.
    pub fn from_series(series: &Series) -> Self {
        let (x_min, mut x_max) = series.x_range().unwrap_or((0.0, 1.0));
        if (x_max - x_min).abs() < 1e-9 { x_max = x_min + 1.0; }
        let (y_min, y_max) = y_bounds(series);
        Self { x_min, x_max, y_min, y_max }
    }

    /// x fixed to the trailing window ending at `now`; y autoscaled.
    pub fn for_window(series: &Series, window: Window, now: DateTime<Utc>) -> Self {
        let x_max = now.timestamp() as f64;
        let x_min = x_max - window.lookback().num_seconds() as f64;
        let (y_min, y_max) = y_bounds(series);
        Self { x_min, x_max, y_min, y_max }
    }
}

fn y_bounds(series: &Series) -> (f64, f64) {
    // begin at zero; negative counts still stay visible
    let (lo, hi) = series.y_range().unwrap_or((0.0, 1.0));
    let y_min = lo.min(0.0);
    let mut y_max = hi.max(0.0);
    if (y_max - y_min).abs() < 1e-9 { y_max = y_min + 1.0; }
    let m = (y_max - y_min) * 0.05;
    (y_min, y_max + m)
}
