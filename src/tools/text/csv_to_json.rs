//! csv-to-json tool

use serde_json::{Map, Number, Value};

use crate::tools::developer::pretty_json;
use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

/// Split CSV text into rows of raw fields
///
/// Quoted fields may contain the delimiter, newlines and `""` escapes.
/// Both LF and CRLF row endings are accepted.
pub fn parse_csv(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => row.push(std::mem::take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            c => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// Infer a JSON value from a CSV cell
pub fn typed_value(cell: &str) -> Value {
    let lower = cell.to_lowercase();
    match lower.as_str() {
        "" | "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::Number(n.into());
    }
    let looks_numeric = cell
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if looks_numeric {
        if let Ok(f) = cell.parse::<f64>() {
            // whole values print without a fraction, as `1e3` -> 1000
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                return Value::Number((f as i64).into());
            }
            if let Some(n) = Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }
    Value::String(cell.to_string())
}

fn parse_delimiter(name: &str) -> Result<char> {
    match name {
        "," | "comma" => Ok(','),
        ";" | "semicolon" => Ok(';'),
        "\t" | "tab" => Ok('\t'),
        "|" | "pipe" => Ok('|'),
        other => Err(OktoolsError::option(
            "delimiter",
            format!("'{}' is not one of , ; tab |", other),
        )),
    }
}

pub struct CsvToJsonTool;

impl Tool for CsvToJsonTool {
    fn id(&self) -> &'static str {
        "csv-to-json"
    }

    fn name(&self) -> &'static str {
        "CSV to JSON"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Convert CSV format to JSON"
    }

    fn icon(&self) -> &'static str {
        "📋"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "delimiter": { "type": "string", "enum": [",", ";", "tab", "|"], "default": "," },
                "header": { "type": "boolean", "default": true, "description": "First row holds field names" },
                "trim": { "type": "boolean", "default": true, "description": "Trim whitespace around fields" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let text = require_input(input, "CSV data")?;
        let delimiter = parse_delimiter(&options.str_or("delimiter", ",")?)?;
        let header = options.bool_or("header", true)?;
        let trim = options.bool_or("trim", true)?;

        let mut rows = parse_csv(text, delimiter);
        if trim {
            for field in rows.iter_mut().flatten() {
                *field = field.trim().to_string();
            }
        }

        let result = if header {
            let mut rows = rows.into_iter();
            let names = rows.next().unwrap_or_default();
            let records: Vec<Value> = rows
                .map(|row| {
                    let record: Map<String, Value> = names
                        .iter()
                        .enumerate()
                        .map(|(i, name)| {
                            let cell = row.get(i).map(String::as_str).unwrap_or("");
                            (name.clone(), typed_value(cell))
                        })
                        .collect();
                    Value::Object(record)
                })
                .collect();
            Value::Array(records)
        } else {
            serde_json::to_value(rows)?
        };
        pretty_json(&result, 2)
    }
}
