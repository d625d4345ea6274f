//! # UTC Timestamps
//!
//! `Timestamp` is UTC-only and truncated to whole seconds. It stamps root
//! epochs and consumed-nullifier records, both of which end up in persisted
//! registry snapshots.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ZkacError;

/// A UTC timestamp with seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// From a `DateTime<Utc>`, discarding sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Parse RFC 3339 with a `Z` suffix. Explicit offsets are rejected.
    pub fn parse(s: &str) -> Result<Self, ZkacError> {
        if !s.ends_with('Z') {
            return Err(ZkacError::Validation(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| ZkacError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// The inner datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn from_utc_truncates() {
        let dt = Utc
            .with_ymd_and_hms(2026, 10, 19, 9, 30, 15)
            .unwrap()
            .with_nanosecond(999_000_000)
            .unwrap();
        assert_eq!(Timestamp::from_utc(dt).to_iso8601(), "2026-10-19T09:30:15Z");
    }

    #[test]
    fn parse_rejects_offsets() {
        assert!(Timestamp::parse("2026-10-19T09:30:15Z").is_ok());
        assert!(Timestamp::parse("2026-10-19T09:30:15+00:00").is_err());
        assert!(Timestamp::parse("not-a-time").is_err());
    }

    #[test]
    fn ordering_follows_time() {
        let a = Timestamp::parse("2026-10-19T09:30:15Z").unwrap();
        let b = Timestamp::parse("2026-10-19T09:30:16Z").unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::parse("2026-10-19T09:30:15Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }
}
