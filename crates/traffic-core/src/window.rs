// File: crates/traffic-core/src/window.rs
// Summary: Trailing window selection and its policy table (look-back, bucket width, axis unit).

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Trailing duration the statistics view displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// Width of the time slot observations are folded into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BucketWidth {
    /// Every distinct timestamp is its own bucket.
    Ungrouped,
    /// Fixed slot of `n` seconds, anchored at midnight. `n` divides a day.
    Seconds(i64),
}

/// Tick spacing hint handed to the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
}

/// One row of the window policy table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowPolicy {
    pub lookback_secs: i64,
    pub bucket: BucketWidth,
    pub unit: TimeUnit,
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

const POLICY: [(Window, WindowPolicy); 5] = [
    (Window::Hour, WindowPolicy { lookback_secs: HOUR, bucket: BucketWidth::Ungrouped, unit: TimeUnit::Minute }),
    (Window::Day, WindowPolicy { lookback_secs: DAY, bucket: BucketWidth::Seconds(30 * MINUTE), unit: TimeUnit::Hour }),
    (Window::Week, WindowPolicy { lookback_secs: 7 * DAY, bucket: BucketWidth::Seconds(4 * HOUR), unit: TimeUnit::Day }),
    (Window::Month, WindowPolicy { lookback_secs: 30 * DAY, bucket: BucketWidth::Seconds(DAY), unit: TimeUnit::Day }),
    (Window::Year, WindowPolicy { lookback_secs: 365 * DAY, bucket: BucketWidth::Seconds(DAY), unit: TimeUnit::Day }),
];

impl Window {
    pub const ALL: [Window; 5] = [Window::Hour, Window::Day, Window::Week, Window::Month, Window::Year];

    /// Lenient parse used for UI input: unknown tokens fall back to the narrowest window.
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or_else(|_| {
            log::debug!("unrecognised window token {token:?}, using hour");
            Window::Hour
        })
    }

    pub fn policy(self) -> WindowPolicy {
        // rows are in declaration order
        POLICY[self as usize].1
    }

    pub fn lookback(self) -> Duration {
        Duration::seconds(self.policy().lookback_secs)
    }

    pub fn bucket_width(self) -> BucketWidth {
        self.policy().bucket
    }

    pub fn unit(self) -> TimeUnit {
        self.policy().unit
    }

    pub fn token(self) -> &'static str {
        match self {
            Window::Hour => "hour",
            Window::Day => "day",
            Window::Week => "week",
            Window::Month => "month",
            Window::Year => "year",
        }
    }

    /// Caption shown on the selector button.
    pub fn label(self) -> &'static str {
        match self {
            Window::Hour => "Hour",
            Window::Day => "Day",
            Window::Week => "Week",
            Window::Month => "Month",
            Window::Year => "Year",
        }
    }
}

/// The statistics view opens on the last day.
impl Default for Window {
    fn default() -> Self {
        Window::Day
    }
}

impl FromStr for Window {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Window::ALL
            .into_iter()
            .find(|w| w.token().eq_ignore_ascii_case(t))
            .ok_or_else(|| Error::UnknownWindow(s.to_string()))
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl TimeUnit {
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Minute => MINUTE,
            TimeUnit::Hour => HOUR,
            TimeUnit::Day => DAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_table_matches_windows() {
        assert_eq!(Window::Hour.lookback(), Duration::hours(1));
        assert_eq!(Window::Day.lookback(), Duration::hours(24));
        assert_eq!(Window::Week.lookback(), Duration::days(7));
        assert_eq!(Window::Month.lookback(), Duration::days(30));
        assert_eq!(Window::Year.lookback(), Duration::days(365));

        assert_eq!(Window::Hour.bucket_width(), BucketWidth::Ungrouped);
        assert_eq!(Window::Day.bucket_width(), BucketWidth::Seconds(1800));
        assert_eq!(Window::Week.bucket_width(), BucketWidth::Seconds(4 * 3600));
        assert_eq!(Window::Month.bucket_width(), BucketWidth::Seconds(86_400));
        assert_eq!(Window::Year.bucket_width(), BucketWidth::Seconds(86_400));
    }

    #[test]
    fn policy_rows_follow_declaration_order() {
        for (i, (w, _)) in POLICY.iter().enumerate() {
            assert_eq!(*w as usize, i);
        }
    }

    #[test]
    fn every_bucket_width_divides_a_day() {
        for w in Window::ALL {
            if let BucketWidth::Seconds(n) = w.bucket_width() {
                assert_eq!(DAY % n, 0, "{w}");
            }
        }
    }

    #[test]
    fn unit_hints() {
        assert_eq!(Window::Hour.unit(), TimeUnit::Minute);
        assert_eq!(Window::Day.unit(), TimeUnit::Hour);
        assert_eq!(Window::Week.unit(), TimeUnit::Day);
        assert_eq!(Window::Year.unit(), TimeUnit::Day);
    }

    #[test]
    fn tokens_parse_leniently() {
        assert_eq!(Window::from_token("week"), Window::Week);
        assert_eq!(Window::from_token(" Month "), Window::Month);
        assert_eq!(Window::from_token("fortnight"), Window::Hour);
        assert_eq!(Window::from_token(""), Window::Hour);
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert!(matches!("decade".parse::<Window>(), Err(Error::UnknownWindow(_))));
        assert_eq!("YEAR".parse::<Window>().ok(), Some(Window::Year));
    }

    #[test]
    fn display_roundtrips_token() {
        for w in Window::ALL {
            assert_eq!(Window::from_token(&w.to_string()), w);
        }
    }
}
