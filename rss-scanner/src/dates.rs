//! Normalization of feed timestamps.
//!
//! Feeds hand over publication times either already broken down into
//! calendar fields or as strings in one of a handful of formats. Everything
//! is reduced to a zone-less `NaiveDateTime` read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use interfaces::defs::{PublishedTime, TimeParts};
use tracing::{debug, warn};

/// Zone names accepted at the end of an RFC-822 timestamp. All mean UTC.
const UTC_ZONE_NAMES: [&str; 4] = ["GMT", "UTC", "UT", "Z"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextFormat {
    /// `Mon, 06 Jan 2025 10:00:00 GMT`
    Rfc822ZoneName,
    /// `Mon, 06 Jan 2025 10:00:00 +0900`
    Rfc822Offset,
    /// `2025-01-06T10:00:00`
    IsoLocal,
    /// `2025-01-06T10:00:00Z`
    IsoUtc,
    /// Anything chrono reads as RFC 2822 or RFC 3339.
    Lenient,
}

/// Tried in order, first match wins.
const TEXT_FORMATS: [TextFormat; 5] = [
    TextFormat::Rfc822ZoneName,
    TextFormat::Rfc822Offset,
    TextFormat::IsoLocal,
    TextFormat::IsoUtc,
    TextFormat::Lenient,
];

impl TextFormat {
    fn parse(self, text: &str) -> Option<NaiveDateTime> {
        match self {
            TextFormat::Rfc822ZoneName => {
                let (stamp, zone) = without_weekday(text).rsplit_once(' ')?;
                if !UTC_ZONE_NAMES.iter().any(|name| name.eq_ignore_ascii_case(zone)) {
                    return None;
                }
                NaiveDateTime::parse_from_str(stamp, "%d %b %Y %H:%M:%S").ok()
            }
            TextFormat::Rfc822Offset => DateTime::parse_from_str(without_weekday(text), "%d %b %Y %H:%M:%S %z")
                .ok()
                .map(|dt| dt.naive_utc()),
            TextFormat::IsoLocal => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").ok(),
            TextFormat::IsoUtc => NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%SZ").ok(),
            TextFormat::Lenient => DateTime::parse_from_rfc2822(text)
                .or_else(|_| DateTime::parse_from_rfc3339(text))
                .ok()
                .map(|dt| dt.naive_utc()),
        }
    }
}

/// Drop a leading `Mon, ` so a weekday that disagrees with the date is ignored.
fn without_weekday(text: &str) -> &str {
    match text.split_once(", ") {
        Some((day, rest)) if day.len() == 3 && day.chars().all(|c| c.is_ascii_alphabetic()) => rest,
        _ => text,
    }
}

/// Reduce any supported timestamp shape to a canonical date/time.
///
/// Returns `None` for absent or unparseable values; never panics.
pub fn normalize(published: &PublishedTime) -> Option<NaiveDateTime> {
    match published {
        PublishedTime::Parts(parts) => from_parts(parts),
        PublishedTime::Text(text) => parse_text(text),
        PublishedTime::Absent => None,
    }
}

pub fn from_parts(parts: &TimeParts) -> Option<NaiveDateTime> {
    let normalized = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)
        .and_then(|date| date.and_hms_opt(parts.hour, parts.minute, parts.second));

    if normalized.is_none() {
        warn!("Error parsing date: {:?} is not a valid calendar time", parts);
    }
    normalized
}

pub fn parse_text(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();

    for format in TEXT_FORMATS {
        if let Some(parsed) = format.parse(trimmed) {
            debug!("Parsed date {:?} as {:?}", trimmed, format);
            return Some(parsed);
        }
    }

    warn!("Error parsing date: {:?} matches no known format", text);
    None
}

pub fn to_parts(timestamp: &DateTime<Utc>) -> TimeParts {
    use chrono::{Datelike, Timelike};

    TimeParts {
        year: timestamp.year(),
        month: timestamp.month(),
        day: timestamp.day(),
        hour: timestamp.hour(),
        minute: timestamp.minute(),
        second: timestamp.second(),
    }
}

/// Timestamp hook for feed-rs, so feed date strings go through the same formats.
pub fn feed_timestamp(text: &str) -> Option<DateTime<Utc>> {
    parse_text(text).map(|naive| Utc.from_utc_datetime(&naive))
}
