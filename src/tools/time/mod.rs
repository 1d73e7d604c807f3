//! Time tools and the date helpers shared with other categories

mod batch_timestamp;
mod timestamp;

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub use batch_timestamp::{BatchTimestampTool, convert_batch};
pub use timestamp::{TimestampTool, convert_timestamp};

/// Local date-time layout used in every tool output
pub const LOCAL_FORMAT: &str = "%Y/%-m/%-d %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

pub fn format_in<Tz: TimeZone>(tz: &Tz, instant: &DateTime<Utc>) -> String
where
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format(LOCAL_FORMAT).to_string()
}

/// Unix seconds rendered in the local timezone
pub fn format_local(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(instant) => format_in(&Local, &instant),
        None => format!("{} (out of range)", secs),
    }
}

/// JavaScript `toISOString` layout
pub fn iso_8601(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parse a date string; zone-less forms are read in `tz`
pub fn parse_datetime<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_in_offset() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let instant = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_in(&tz, &instant), "2023/11/15 06:13:20");
        assert_eq!(format_in(&Utc, &instant), "2023/11/14 22:13:20");
    }

    #[test]
    fn test_iso_8601_has_millis() {
        let instant = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(iso_8601(&instant), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_parse_datetime_forms() {
        let expected = 1_704_110_400;
        for text in [
            "2024-01-01 12:00:00",
            "2024/01/01 12:00:00",
            "2024-01-01T12:00:00Z",
            "2024-01-01T20:00:00+08:00",
            "Mon, 01 Jan 2024 12:00:00 +0000",
        ] {
            let parsed = parse_datetime(text, &Utc).unwrap();
            assert_eq!(parsed.timestamp(), expected, "{}", text);
        }
        assert_eq!(parse_datetime("2024/1/1", &Utc).unwrap().timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_parse_datetime_uses_zone_for_naive() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let parsed = parse_datetime("2024-01-01 08:00:00", &tz).unwrap();
        assert_eq!(parsed.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("yesterday-ish", &Utc).is_none());
    }
}
