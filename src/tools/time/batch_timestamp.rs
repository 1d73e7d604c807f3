//! batch-timestamp tool - one conversion per line

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;

use crate::error::Result;
use crate::tools::definition::{ERROR_GLYPH, Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

use super::{format_in, parse_datetime};

/// Numbers at or above this are milliseconds
const MILLIS_THRESHOLD: i64 = 10_000_000_000;

fn convert_line<Tz: TimeZone>(line: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if line.bytes().all(|b| b.is_ascii_digit()) {
        let parsed = line.parse::<i64>().ok().and_then(|n| {
            if n < MILLIS_THRESHOLD {
                DateTime::from_timestamp(n, 0).map(|dt| (n, "seconds", dt))
            } else {
                DateTime::from_timestamp_millis(n).map(|dt| (n, "ms", dt))
            }
        });
        return match parsed {
            Some((n, unit, dt)) => format!("{} ({}) | {}", n, unit, format_in(tz, &dt)),
            None => format!("{} | {} unable to parse", line, ERROR_GLYPH),
        };
    }

    match parse_datetime(line, tz) {
        Some(dt) => format!(
            "{} | {} (ms) | {} (seconds)",
            line,
            dt.timestamp_millis(),
            dt.timestamp()
        ),
        None => format!("{} | {} unable to parse", line, ERROR_GLYPH),
    }
}

/// Convert every non-blank line; bad lines are reported inline
pub fn convert_batch<Tz: TimeZone>(text: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| convert_line(line, tz))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct BatchTimestampTool;

impl Tool for BatchTimestampTool {
    fn id(&self) -> &'static str {
        "batch-timestamp"
    }

    fn name(&self) -> &'static str {
        "Batch Timestamp Converter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Time
    }

    fn description(&self) -> &'static str {
        "Convert multiple timestamps at once"
    }

    fn icon(&self) -> &'static str {
        "⏰"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "description": "Input: one timestamp or date per line"
        })
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        let text = require_input(input, "one timestamp or date per line")?;
        let out = convert_batch(text, &Local);
        log::debug!("Converted {} timestamp lines", out.lines().count());
        Ok(out)
    }
}
