//! binary-converter tool - base 2/8/10/16 conversion

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

/// Parse an integer with an optional sign and `0b`/`0o`/`0x` prefix
pub fn parse_integer(input: &str) -> Result<i128> {
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };

    let lower = body.to_ascii_lowercase();
    let (radix, digits) = if let Some(d) = lower.strip_prefix("0b") {
        (2, d)
    } else if let Some(d) = lower.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = lower.strip_prefix("0x") {
        (16, d)
    } else {
        (10, lower.as_str())
    };

    // from_str_radix would accept a second sign after the prefix
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(OktoolsError::InvalidInput(format!(
            "'{}' is not a valid base-{} number",
            input, radix
        )));
    }
    let magnitude = i128::from_str_radix(digits, radix)
        .map_err(|e| OktoolsError::InvalidInput(format!("'{}': {}", input, e)))?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn signed(value: i128, prefix: &str, digits: String) -> String {
    if value < 0 {
        format!("-{}{}", prefix, digits)
    } else {
        format!("{}{}", prefix, digits)
    }
}

/// All four renderings of `value`
pub fn render_bases(value: i128) -> String {
    let magnitude = value.unsigned_abs();
    [
        format!("BIN: {}", signed(value, "0b", format!("{:b}", magnitude))),
        format!("OCT: {}", signed(value, "0o", format!("{:o}", magnitude))),
        format!("DEC: {}", value),
        format!("HEX: {}", signed(value, "0x", format!("{:X}", magnitude))),
    ]
    .join("\n")
}

pub struct BinaryConverterTool;

impl Tool for BinaryConverterTool {
    fn id(&self) -> &'static str {
        "binary-converter"
    }

    fn name(&self) -> &'static str {
        "Binary Converter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Convert between binary, octal, decimal, hex"
    }

    fn icon(&self) -> &'static str {
        "💻"
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        let value = parse_integer(require_input(input, "a number")?)?;
        Ok(render_bases(value))
    }
}
