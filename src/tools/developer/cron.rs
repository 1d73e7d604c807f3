//! Cron expressions: parsing, next-run preview and building

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;
use crate::tools::time::LOCAL_FORMAT;

/// Years searched ahead before giving up on a schedule
const SEARCH_YEARS: i64 = 5;

const MONTH_NAMES: &[&str] = &[
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const WEEKDAY_NAMES: &[&str] = &["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Static description of one cron column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
    pub range_label: &'static str,
    names: Option<&'static [&'static str]>,
}

pub const MINUTE: FieldSpec = FieldSpec {
    name: "Minute",
    min: 0,
    max: 59,
    range_label: "0-59",
    names: None,
};
pub const HOUR: FieldSpec = FieldSpec {
    name: "Hour",
    min: 0,
    max: 23,
    range_label: "0-23",
    names: None,
};
pub const DAY_OF_MONTH: FieldSpec = FieldSpec {
    name: "Day of month",
    min: 1,
    max: 31,
    range_label: "1-31",
    names: None,
};
pub const MONTH: FieldSpec = FieldSpec {
    name: "Month",
    min: 1,
    max: 12,
    range_label: "1-12",
    names: Some(MONTH_NAMES),
};
pub const DAY_OF_WEEK: FieldSpec = FieldSpec {
    name: "Day of week",
    min: 0,
    max: 7,
    range_label: "0-7, 0 or 7 = Sunday",
    names: Some(WEEKDAY_NAMES),
};
pub const YEAR: FieldSpec = FieldSpec {
    name: "Year",
    min: 1970,
    max: 2099,
    range_label: "1970-2099",
    names: None,
};

impl FieldSpec {
    fn value(&self, token: &str) -> Result<u32> {
        let upper = token.to_uppercase();
        let named = self.names.and_then(|names| {
            names
                .iter()
                .position(|n| *n == upper)
                .map(|i| i as u32 + if self.min == 1 { 1 } else { 0 })
        });
        let value = match named {
            Some(v) => v,
            None => token.parse::<u32>().map_err(|_| {
                OktoolsError::Parse(format!("{}: '{}' is not a number", self.name, token))
            })?,
        };
        if value < self.min || value > self.max {
            return Err(OktoolsError::Parse(format!(
                "{}: {} is outside {}-{}",
                self.name, value, self.min, self.max
            )));
        }
        Ok(value)
    }

    fn step(&self, token: &str) -> Result<u32> {
        match token.parse::<u32>() {
            Ok(step) if step > 0 => Ok(step),
            _ => Err(OktoolsError::Parse(format!(
                "{}: invalid step '{}'",
                self.name, token
            ))),
        }
    }
}

/// The set of values one column matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronField {
    pub raw: String,
    pub values: BTreeSet<u32>,
    pub any: bool,
}

impl CronField {
    pub fn parse(raw: &str, spec: &FieldSpec) -> Result<Self> {
        let mut values = BTreeSet::new();
        for item in raw.split(',') {
            if item.is_empty() {
                return Err(OktoolsError::Parse(format!("{}: empty list item", spec.name)));
            }
            let (base, step) = match item.split_once('/') {
                Some((base, step)) => (base, Some(spec.step(step)?)),
                None => (item, None),
            };
            let (start, end) = if base == "*" {
                (spec.min, spec.max)
            } else if let Some((a, b)) = base.split_once('-') {
                let (a, b) = (spec.value(a)?, spec.value(b)?);
                if a > b {
                    return Err(OktoolsError::Parse(format!(
                        "{}: range {}-{} is reversed",
                        spec.name, a, b
                    )));
                }
                (a, b)
            } else {
                let v = spec.value(base)?;
                // `n/step` runs from n to the end of the range
                (v, if step.is_some() { spec.max } else { v })
            };
            let step = step.unwrap_or(1) as usize;
            values.extend((start..=end).step_by(step));
        }

        if spec == &DAY_OF_WEEK && values.remove(&7) {
            values.insert(0);
        }

        Ok(Self {
            raw: raw.to_string(),
            any: raw == "*",
            values,
        })
    }

    pub fn matches(&self, value: u32) -> bool {
        self.values.contains(&value)
    }
}

/// A parsed 5 or 6 field cron expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    pub minute: CronField,
    pub hour: CronField,
    pub day_of_month: CronField,
    pub month: CronField,
    pub day_of_week: CronField,
    pub year: Option<CronField>,
}

impl FromStr for CronSchedule {
    type Err = OktoolsError;

    fn from_str(expr: &str) -> Result<Self> {
        let parts: Vec<&str> = expr.split_whitespace().collect();
        if parts.len() < 5 || parts.len() > 6 {
            return Err(OktoolsError::Parse(format!(
                "expected 5 or 6 fields, found {}",
                parts.len()
            )));
        }
        Ok(Self {
            minute: CronField::parse(parts[0], &MINUTE)?,
            hour: CronField::parse(parts[1], &HOUR)?,
            day_of_month: CronField::parse(parts[2], &DAY_OF_MONTH)?,
            month: CronField::parse(parts[3], &MONTH)?,
            day_of_week: CronField::parse(parts[4], &DAY_OF_WEEK)?,
            year: parts.get(5).map(|y| CronField::parse(y, &YEAR)).transpose()?,
        })
    }
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDateTime> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.and_hms_opt(0, 0, 0)
}

impl CronSchedule {
    /// Fields paired with their specs, in column order
    pub fn fields(&self) -> Vec<(&FieldSpec, &CronField)> {
        let mut fields = vec![
            (&MINUTE, &self.minute),
            (&HOUR, &self.hour),
            (&DAY_OF_MONTH, &self.day_of_month),
            (&MONTH, &self.month),
            (&DAY_OF_WEEK, &self.day_of_week),
        ];
        if let Some(year) = &self.year {
            fields.push((&YEAR, year));
        }
        fields
    }

    /// Day matching: when both day columns are restricted either may match
    fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = self.day_of_month.matches(date.day());
        let dow = self.day_of_week.matches(date.weekday().num_days_from_sunday());
        match (self.day_of_month.any, self.day_of_week.any) {
            (true, true) => true,
            (true, false) => dow,
            (false, true) => dom,
            (false, false) => dom || dow,
        }
    }

    fn year_matches(&self, year: i32) -> bool {
        self.year
            .as_ref()
            .is_none_or(|f| u32::try_from(year).is_ok_and(|y| f.matches(y)))
    }

    /// The next `count` fire times strictly after `after`
    pub fn next_runs(&self, after: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
        let mut runs = Vec::with_capacity(count);
        let Some(start) = after
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .map(|t| t + Duration::minutes(1))
        else {
            return runs;
        };
        let limit = start + Duration::days(366 * SEARCH_YEARS);

        let mut t = start;
        while t <= limit && runs.len() < count {
            if !self.year_matches(t.year()) {
                match NaiveDate::from_ymd_opt(t.year() + 1, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0)) {
                    Some(next) => t = next,
                    None => break,
                }
                continue;
            }
            if !self.month.matches(t.month()) {
                match first_of_next_month(t.date()) {
                    Some(next) => t = next,
                    None => break,
                }
                continue;
            }
            if !self.day_matches(t.date()) {
                match (t.date() + Duration::days(1)).and_hms_opt(0, 0, 0) {
                    Some(next) => t = next,
                    None => break,
                }
                continue;
            }
            if !self.hour.matches(t.hour()) {
                t = t - Duration::minutes(t.minute() as i64) + Duration::hours(1);
                continue;
            }
            if self.minute.matches(t.minute()) {
                runs.push(t);
            }
            t += Duration::minutes(1);
        }
        runs
    }
}

/// Explain `expr` and list its next `count` runs after `now`
pub fn describe(expr: &str, now: NaiveDateTime, count: usize) -> Result<String> {
    let schedule: CronSchedule = expr.parse()?;
    let mut lines: Vec<String> = schedule
        .fields()
        .iter()
        .map(|(spec, field)| format!("{}: {} ({})", spec.name, field.raw, spec.range_label))
        .collect();

    lines.push(String::new());
    let runs = schedule.next_runs(now, count);
    if runs.is_empty() {
        lines.push(format!("No runs within the next {} years", SEARCH_YEARS));
    } else {
        lines.push(format!("Next {} runs:", runs.len()));
        lines.extend(
            runs.iter()
                .enumerate()
                .map(|(i, t)| format!("#{}: {}", i + 1, t.format(LOCAL_FORMAT))),
        );
    }
    Ok(lines.join("\n"))
}

pub struct CronParserTool;

impl Tool for CronParserTool {
    fn id(&self) -> &'static str {
        "cron-parser"
    }

    fn name(&self) -> &'static str {
        "Cron Parser"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Parse and preview cron expressions"
    }

    fn icon(&self) -> &'static str {
        "⏰"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "count": { "type": "integer", "default": 5, "description": "Upcoming runs to list (1-50)" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let expr = require_input(input, "a cron expression")?;
        let count = options.uint_in("count", 5, 1..=50)? as usize;
        describe(expr, Local::now().naive_local(), count)
    }
}

/// Named shortcuts for common schedules
pub const PRESETS: [(&str, &str); 12] = [
    ("every-minute", "* * * * *"),
    ("hourly", "0 * * * *"),
    ("daily", "0 0 * * *"),
    ("weekly-monday", "0 0 * * 1"),
    ("monthly", "0 0 1 * *"),
    ("daily-9am", "0 9 * * *"),
    ("weekdays-9am", "0 9 * * 1-5"),
    ("every-5-minutes", "*/5 * * * *"),
    ("every-2-hours", "0 */2 * * *"),
    ("daily-noon", "0 12 * * *"),
    ("daily-6pm", "0 18 * * *"),
    ("daily-2359", "59 23 * * *"),
];

pub struct CronBuilderTool;

impl Tool for CronBuilderTool {
    fn id(&self) -> &'static str {
        "cron-builder"
    }

    fn name(&self) -> &'static str {
        "Cron Builder"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Visual cron expression builder"
    }

    fn icon(&self) -> &'static str {
        "⏰"
    }

    fn options_schema(&self) -> Value {
        let presets: Vec<&str> = PRESETS.iter().map(|(name, _)| *name).collect();
        serde_json::json!({
            "type": "object",
            "properties": {
                "preset": { "type": "string", "enum": presets, "description": "Start from a named schedule" },
                "minute": { "type": "string", "default": "*", "description": "0-59" },
                "hour": { "type": "string", "default": "*", "description": "0-23" },
                "day": { "type": "string", "default": "*", "description": "1-31" },
                "month": { "type": "string", "default": "*", "description": "1-12" },
                "weekday": { "type": "string", "default": "*", "description": "0-6, 0 = Sunday" }
            }
        })
    }

    fn process(&self, _input: &str, options: &ToolOptions) -> Result<String> {
        let base: Vec<&str> = match options.string("preset")? {
            Some(name) => PRESETS
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
                .map(|(_, expr)| expr.split(' ').collect())
                .ok_or_else(|| OktoolsError::option("preset", format!("unknown preset '{}'", name)))?,
            None => vec!["*"; 5],
        };

        let specs = [
            ("minute", &MINUTE),
            ("hour", &HOUR),
            ("day", &DAY_OF_MONTH),
            ("month", &MONTH),
            ("weekday", &DAY_OF_WEEK),
        ];
        let mut fields = Vec::with_capacity(specs.len());
        for (i, (key, spec)) in specs.iter().enumerate() {
            let value = options.str_or(key, base[i])?;
            let value = value.trim();
            CronField::parse(value, spec).map_err(|e| OktoolsError::option(*key, e.to_string()))?;
            fields.push(value.to_string());
        }
        Ok(fields.join(" "))
    }
}
