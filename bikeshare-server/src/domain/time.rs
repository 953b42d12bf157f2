//! Feed timestamp decoding.
//!
//! GBFS publishers disagree on how to encode times: most send integer
//! POSIX seconds, some send fractional seconds, some send RFC 3339
//! strings. All decode to UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Error returned when a timestamp cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {0}")]
pub struct InvalidTimestamp(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(i64),
    Fractional(f64),
    Text(String),
}

fn from_seconds(secs: i64) -> Result<DateTime<Utc>, InvalidTimestamp> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| InvalidTimestamp(secs.to_string()))
}

fn from_fractional(secs: f64) -> Result<DateTime<Utc>, InvalidTimestamp> {
    let invalid = || InvalidTimestamp(secs.to_string());
    if !secs.is_finite() {
        return Err(invalid());
    }

    let whole = secs.floor();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return Err(invalid());
    }

    let mut whole = whole as i64;
    let mut nanos = ((secs - secs.floor()) * 1e9).round() as u32;
    if nanos >= 1_000_000_000 {
        whole = whole.checked_add(1).ok_or_else(invalid)?;
        nanos = 0;
    }

    DateTime::from_timestamp(whole, nanos).ok_or_else(invalid)
}

/// Parse a timestamp given as text.
///
/// Accepts RFC 3339 (`2019-03-26T09:30:53Z`) or a decimal count of
/// POSIX seconds (`1553592653`).
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, InvalidTimestamp> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let secs: i64 = s.parse().map_err(|_| InvalidTimestamp(s.to_string()))?;
    from_seconds(secs)
}

/// Serde adapter for feed timestamps, used with `deserialize_with`.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer)?;
    let parsed = match raw {
        RawTimestamp::Seconds(secs) => from_seconds(secs),
        RawTimestamp::Fractional(secs) => from_fractional(secs),
        RawTimestamp::Text(text) => parse_timestamp(&text),
    };
    parsed.map_err(serde::de::Error::custom)
}
