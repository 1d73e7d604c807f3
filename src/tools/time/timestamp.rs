//! timestamp tool - Unix timestamps to dates and back

use std::fmt::Display;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

use super::{format_in, iso_8601, parse_datetime};

/// Digit strings longer than this are read as milliseconds
const SECONDS_DIGITS: usize = 10;

/// Years RFC 2822 can represent
const RFC_2822_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

fn from_digits(digits: &str) -> Result<DateTime<Utc>> {
    let value: i64 = digits
        .parse()
        .map_err(|_| OktoolsError::InvalidInput(format!("timestamp '{}' is too large", digits)))?;
    let instant = if digits.len() > SECONDS_DIGITS {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    };
    instant.ok_or_else(|| OktoolsError::InvalidInput(format!("timestamp '{}' is out of range", digits)))
}

/// Convert one timestamp or date string, rendering local times in `tz`
pub fn convert_timestamp<Tz: TimeZone>(input: &str, now: DateTime<Utc>, tz: &Tz) -> Result<String>
where
    Tz::Offset: Display,
{
    let text = input.trim();
    let numeric = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());

    let instant = if text.is_empty() || text.eq_ignore_ascii_case("now") {
        now
    } else if numeric {
        from_digits(text)?
    } else {
        parse_datetime(text, tz).ok_or_else(|| {
            OktoolsError::Parse(format!("'{}' is not a timestamp or a recognised date", text))
        })?
    };

    let mut lines = vec![
        format!("Seconds: {}", instant.timestamp()),
        format!("Milliseconds: {}", instant.timestamp_millis()),
        format!("Local: {}", format_in(tz, &instant)),
        format!("ISO 8601: {}", iso_8601(&instant)),
    ];
    if numeric && RFC_2822_YEARS.contains(&instant.year()) {
        lines.push(format!("UTC: {}", instant.to_rfc2822()));
    }
    Ok(lines.join("\n"))
}

pub struct TimestampTool;

impl Tool for TimestampTool {
    fn id(&self) -> &'static str {
        "timestamp"
    }

    fn name(&self) -> &'static str {
        "Unix Timestamp"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Time
    }

    fn description(&self) -> &'static str {
        "Convert timestamps"
    }

    fn icon(&self) -> &'static str {
        "⏰"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "description": "Input: seconds, milliseconds, a date string, or 'now'"
        })
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        convert_timestamp(input, Utc::now(), &Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_600_000_000, 0).unwrap()
    }

    #[test]
    fn test_seconds_input() {
        let out = convert_timestamp("1700000000", now(), &Utc).unwrap();
        assert_eq!(
            out,
            "Seconds: 1700000000\n\
             Milliseconds: 1700000000000\n\
             Local: 2023/11/14 22:13:20\n\
             ISO 8601: 2023-11-14T22:13:20.000Z\n\
             UTC: Tue, 14 Nov 2023 22:13:20 +0000"
        );
    }

    #[test]
    fn test_millisecond_input() {
        let out = convert_timestamp("1700000000500", now(), &Utc).unwrap();
        assert!(out.starts_with("Seconds: 1700000000\nMilliseconds: 1700000000500"));
        assert!(out.contains("ISO 8601: 2023-11-14T22:13:20.500Z"));
    }

    #[test]
    fn test_date_input_has_no_utc_line() {
        let out = convert_timestamp("2024-01-01 12:00:00", now(), &Utc).unwrap();
        assert!(out.starts_with("Seconds: 1704110400"));
        assert!(!out.contains("UTC:"));
    }

    #[test]
    fn test_empty_and_now_use_clock() {
        for input in ["", "  ", "NOW"] {
            let out = convert_timestamp(input, now(), &Utc).unwrap();
            assert!(out.starts_with("Seconds: 1600000000"));
        }
    }

    #[test]
    fn test_far_future_skips_utc_line() {
        let out = convert_timestamp("999999999999999", now(), &Utc).unwrap();
        assert!(out.starts_with("Seconds: 999999999999\nMilliseconds: 999999999999999"));
        assert!(out.contains("Local: +33658/9/27"));
        assert!(!out.contains("UTC:"));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(convert_timestamp("soon", now(), &Utc), Err(OktoolsError::Parse(_))));
        assert!(convert_timestamp("99999999999999999999", now(), &Utc).is_err());
    }
}
