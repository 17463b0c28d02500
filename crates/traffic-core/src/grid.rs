// File: crates/traffic-core/src/grid.rs
// Summary: Grid/tick layout helpers, including unit-aligned ticks for time axes.

use chrono::{TimeZone, Utc};

use crate::window::TimeUnit;

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Multiples of the unit the time axis may step by.
const STEP_MULTIPLES: [i64; 9] = [1, 2, 4, 5, 6, 10, 12, 15, 30];

/// Tick positions (unix seconds) on whole multiples of `unit`, at most `max_ticks` of them.
pub fn time_ticks(min: f64, max: f64, unit: TimeUnit, max_ticks: usize) -> Vec<i64> {
    if !(min.is_finite() && max.is_finite()) || max < min || max_ticks == 0 {
        return Vec::new();
    }
    let lo = min.ceil() as i64;
    let hi = max.floor() as i64;
    let base = unit.seconds();
    let span = (hi - lo).max(0);

    let step = STEP_MULTIPLES
        .iter()
        .map(|m| m * base)
        .find(|step| span / step < max_ticks as i64)
        .unwrap_or_else(|| {
            // very long ranges: widen until it fits
            let per = (span / max_ticks as i64 / base + 1) * base;
            per.max(base)
        });

    let first = lo + (step - lo.rem_euclid(step)) % step;
    (0..)
        .map(|i| first + i * step)
        .take_while(|&t| t <= hi)
        .take(max_ticks)
        .collect()
}

/// Tick caption for a time axis value.
pub fn format_tick(secs: i64, unit: TimeUnit) -> String {
    let Some(t) = Utc.timestamp_opt(secs, 0).single() else {
        return String::new();
    };
    match unit {
        TimeUnit::Minute | TimeUnit::Hour => t.format("%H:%M").to_string(),
        TimeUnit::Day => t.format("%b %d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_ends() {
        assert_eq!(linspace(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0, 2.0]);
    }

    #[test]
    fn hour_ticks_align_to_hours() {
        // 00:10 .. 05:50 UTC on day 0
        let ticks = time_ticks(600.0, 21_000.0, TimeUnit::Hour, 10);
        assert_eq!(ticks, vec![3600, 7200, 10_800, 14_400, 18_000]);
    }

    #[test]
    fn ticks_widen_to_fit_budget() {
        // one day of minutes with at most 8 ticks
        let ticks = time_ticks(0.0, 86_400.0, TimeUnit::Minute, 8);
        assert!(ticks.len() <= 8);
        assert!(ticks.windows(2).all(|w| w[1] > w[0]));
        assert!(ticks.iter().all(|t| t % 60 == 0));
    }

    #[test]
    fn degenerate_ranges_have_no_ticks() {
        assert!(time_ticks(10.0, 5.0, TimeUnit::Day, 5).is_empty());
        assert!(time_ticks(f64::NAN, 5.0, TimeUnit::Day, 5).is_empty());
        assert!(time_ticks(0.0, 5.0, TimeUnit::Day, 0).is_empty());
    }

    #[test]
    fn formats_by_unit() {
        assert_eq!(format_tick(3_600 * 13 + 60 * 5, TimeUnit::Hour), "13:05");
        assert_eq!(format_tick(86_400 * 31, TimeUnit::Day), "Feb 01");
    }
}
