//! UTC timestamp newtype.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instant a report item was created, always in UTC.
///
/// Persists as an RFC 3339 string so the cart file stays readable and keeps
/// its meaning across round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Captures the current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Builds a timestamp from milliseconds since the Unix epoch, or `None`
    /// when the value falls outside the representable range.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Strictly earlier than `other`.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Strictly later than `other`.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_wall_clock() {
        let earlier = Timestamp::from_unix_millis(1_700_000_000_000).unwrap();
        let later = Timestamp::from_unix_millis(1_700_000_000_001).unwrap();
        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(!earlier.is_after(&later));
    }

    #[test]
    fn unix_millis_round_trips() {
        let ts = Timestamp::from_unix_millis(1_700_000_000_123).unwrap();
        assert_eq!(ts.unix_millis(), 1_700_000_000_123);
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts = Timestamp::from_unix_millis(0).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.starts_with("\"1970-01-01T00:00:00"));
    }

    #[test]
    fn out_of_range_millis_rejected() {
        assert!(Timestamp::from_unix_millis(i64::MAX).is_none());
    }
}
