//! Timestamp utilities and history windows
//!
//! Store timestamps are naive local times (no offset is recorded), so window
//! cutoffs are computed against the local wall clock.

use chrono::{Duration, Local, NaiveDateTime};
use serde::Serialize;

/// Storage format for the `datetime` column
pub const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parse a store timestamp
///
/// Accepts the storage format plus the ISO `T` separator, with or without
/// fractional seconds.
pub fn parse_store_timestamp(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Recent history window for a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TimeRange {
    #[default]
    Last24Hours,
    Last7Days,
    Last30Days,
}

impl TimeRange {
    /// Parse a query parameter (`24h`, `7d`, `30d`)
    pub fn from_param(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "1d" | "day" => Some(TimeRange::Last24Hours),
            "7d" | "week" => Some(TimeRange::Last7Days),
            "30d" | "month" => Some(TimeRange::Last30Days),
            _ => None,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            TimeRange::Last24Hours => "24h",
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeRange::Last24Hours => "Last 24 Hours",
            TimeRange::Last7Days => "Last 7 Days",
            TimeRange::Last30Days => "Last 30 Days",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            TimeRange::Last24Hours => Duration::hours(24),
            TimeRange::Last7Days => Duration::days(7),
            TimeRange::Last30Days => Duration::days(30),
        }
    }

    /// Earliest timestamp included in the window ending at `now`
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        now - self.duration()
    }

    pub fn all_variants() -> &'static [TimeRange] {
        &[
            TimeRange::Last24Hours,
            TimeRange::Last7Days,
            TimeRange::Last30Days,
        ]
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_params() {
        assert_eq!(TimeRange::from_param("24h"), Some(TimeRange::Last24Hours));
        assert_eq!(TimeRange::from_param("7D"), Some(TimeRange::Last7Days));
        assert_eq!(TimeRange::from_param("30d"), Some(TimeRange::Last30Days));
        assert_eq!(TimeRange::from_param("1y"), None);
        for range in TimeRange::all_variants() {
            assert_eq!(TimeRange::from_param(range.as_param()), Some(*range));
        }
    }

    #[test]
    fn test_cutoffs() {
        let now = at(2025, 3, 31, 12);
        assert_eq!(TimeRange::Last24Hours.cutoff(now), at(2025, 3, 30, 12));
        assert_eq!(TimeRange::Last7Days.cutoff(now), at(2025, 3, 24, 12));
        assert_eq!(TimeRange::Last30Days.cutoff(now), at(2025, 3, 1, 12));
    }

    #[test]
    fn test_default_is_last_24_hours() {
        assert_eq!(TimeRange::default(), TimeRange::Last24Hours);
        assert_eq!(TimeRange::default().to_string(), "Last 24 Hours");
    }

    #[test]
    fn test_parse_store_timestamps() {
        let expected = at(2025, 1, 15, 9);
        assert_eq!(parse_store_timestamp("2025-01-15 09:00:00"), Some(expected));
        assert_eq!(parse_store_timestamp("2025-01-15T09:00:00"), Some(expected));
        assert_eq!(parse_store_timestamp("2025-01-15 09:00:00.000"), Some(expected));
        assert_eq!(parse_store_timestamp("15/01/2025"), None);
    }

    #[test]
    fn test_store_format_round_trip() {
        let ts = at(2025, 6, 1, 23);
        let text = ts.format(STORE_TIMESTAMP_FORMAT).to_string();
        assert_eq!(text, "2025-06-01 23:00:00");
        assert_eq!(parse_store_timestamp(&text), Some(ts));
    }

    #[test]
    fn test_now_is_recent() {
        // After 2020-01-01
        assert!(now().and_utc().timestamp() > 1_577_836_800);
    }
}
