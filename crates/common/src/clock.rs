//! Timestamp utilities for backend wire values.
//!
//! The backend emits capture and sampling times as strings. Values with an
//! explicit offset are honoured; naive values are UTC. Everything downstream
//! works on `DateTime<Utc>`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Naive layouts accepted after RFC 3339 fails.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A wire timestamp that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unparseable timestamp {value:?}: {reason}")]
pub struct TimestampError {
    /// The raw value as received.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl TimestampError {
    fn new(value: &str, reason: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parse a backend timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::new(raw, "empty"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    let mut last_err = None;
    for format in NAIVE_FORMATS {
        match NaiveDateTime::parse_from_str(trimmed, format) {
            Ok(naive) => return Ok(Utc.from_utc_datetime(&naive)),
            Err(e) => last_err = Some(e),
        }
    }

    Err(TimestampError::new(
        raw,
        last_err.map_or_else(|| "unrecognized format".to_string(), |e| e.to_string()),
    ))
}

/// Unix seconds of `ts`, truncated toward the earlier whole second.
pub fn truncate_to_second(ts: DateTime<Utc>) -> i64 {
    ts.timestamp()
}

/// Parse an event date (`YYYY-MM-DD`, optionally followed by a time part).
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, TimestampError> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| TimestampError::new(raw, e.to_string()))
}

/// Build a display offset from minutes east of UTC.
///
/// Out-of-range offsets fall back to UTC.
pub fn display_offset(utc_offset_minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
}

/// Format a UTC instant as wall-clock `HH:MM:SS` in the given offset.
pub fn format_local_time(ts: DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%H:%M:%S").to_string()
}
