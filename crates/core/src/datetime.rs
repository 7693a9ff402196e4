//! Lenient parsing for the wall-clock datetimes clients submit.
//!
//! Timeslot boundaries are stored without an offset. Browsers send them either
//! ISO-8601 style (`2025-01-01T09:00:00`) or space separated
//! (`2025-01-01 09:00:00`), sometimes without seconds. Values carrying an
//! offset are normalized to UTC.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, de};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a timeslot boundary, returning `None` when no accepted format matches.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Serde adapter for `#[serde(deserialize_with = "...")]` on request fields.
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid datetime `{raw}`, expected ISO-8601 such as 2025-01-01T09:00:00"
        ))
    })
}
