//! number-to-chinese tool - reads numbers as Chinese numerals or financial amounts

use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
const UNITS: [&str; 13] = ["", "十", "百", "千", "万", "十", "百", "千", "亿", "十", "百", "千", "兆"];

const MONEY_DIGITS: [&str; 10] = ["零", "壹", "贰", "叁", "肆", "伍", "陆", "柒", "捌", "玖"];
const MONEY_UNITS: [&str; 13] = ["", "拾", "佰", "仟", "万", "拾", "佰", "仟", "亿", "拾", "佰", "仟", "兆"];
const MONEY_FRACTION_UNITS: [&str; 2] = ["角", "分"];

/// A non-negative decimal split into its digit strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalDigits {
    pub integer: String,
    pub fraction: Option<String>,
}

impl DecimalDigits {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with('-') {
            return Err(OktoolsError::InvalidInput("negative numbers are not supported".to_string()));
        }
        let text = text.strip_prefix('+').unwrap_or(text);
        let (integer, fraction) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text, None),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        let fraction_ok = fraction.is_none_or(|f| !f.is_empty() && all_digits(f));
        if (integer.is_empty() && fraction.is_none()) || !all_digits(integer) || !fraction_ok {
            return Err(OktoolsError::InvalidInput(format!("'{}' is not a valid number", text)));
        }

        let integer = integer.trim_start_matches('0');
        let integer = if integer.is_empty() { "0" } else { integer };
        if integer.len() > UNITS.len() {
            return Err(OktoolsError::InvalidInput(format!(
                "integer part is limited to {} digits",
                UNITS.len()
            )));
        }

        Ok(Self {
            integer: integer.to_string(),
            fraction: fraction.map(str::to_string),
        })
    }
}

fn digit_at(digits: &[u8], index: usize) -> usize {
    (digits[index] - b'0') as usize
}

/// Read an integer digit string using the given numeral and unit tables.
/// Group units (万 亿 兆) are written only when their group holds a non-zero digit.
fn read_integer(integer: &str, digits: &[&str; 10], units: &[&str; 13]) -> String {
    let bytes = integer.as_bytes();
    let len = bytes.len();
    let mut out = String::new();
    let mut pending_zero = false;

    for i in 0..len {
        let place = len - i - 1;
        let digit = digit_at(bytes, i);
        if digit == 0 {
            pending_zero = true;
            if place > 0 && place % 4 == 0 {
                let group_start = i.saturating_sub(3);
                if bytes[group_start..=i].iter().any(|b| *b != b'0') {
                    out.push_str(units[place]);
                    pending_zero = false;
                }
            }
        } else {
            if pending_zero && !out.is_empty() {
                out.push_str(digits[0]);
            }
            pending_zero = false;
            out.push_str(digits[digit]);
            out.push_str(units[place]);
        }
    }

    if out.is_empty() {
        return digits[0].to_string();
    }
    out
}

pub fn to_chinese(number: &DecimalDigits) -> String {
    let mut out = read_integer(&number.integer, &DIGITS, &UNITS);
    if let Some(rest) = out.strip_prefix("一十") {
        out = format!("十{}", rest);
    }
    if let Some(fraction) = &number.fraction {
        out.push('点');
        for b in fraction.bytes() {
            out.push_str(DIGITS[(b - b'0') as usize]);
        }
    }
    out
}

pub fn to_money(number: &DecimalDigits) -> String {
    let fraction: Vec<usize> = number
        .fraction
        .as_deref()
        .unwrap_or("")
        .bytes()
        .take(2)
        .map(|b| (b - b'0') as usize)
        .collect();

    if number.integer == "0" && fraction.iter().all(|d| *d == 0) {
        return "零元整".to_string();
    }

    let mut out = read_integer(&number.integer, &MONEY_DIGITS, &MONEY_UNITS);
    out.push('元');
    for (digit, unit) in fraction.iter().zip(MONEY_FRACTION_UNITS) {
        if *digit != 0 {
            out.push_str(MONEY_DIGITS[*digit]);
            out.push_str(unit);
        }
    }
    if fraction.get(1).copied().unwrap_or(0) == 0 {
        out.push('整');
    }
    out
}

pub struct NumberToChineseTool;

impl Tool for NumberToChineseTool {
    fn id(&self) -> &'static str {
        "number-to-chinese"
    }

    fn name(&self) -> &'static str {
        "Number to Chinese"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Convert numbers to Chinese characters"
    }

    fn icon(&self) -> &'static str {
        "🔢"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": {
                    "type": "string",
                    "enum": ["normal", "money"],
                    "default": "normal",
                    "description": "Plain numerals or upper-case financial amount"
                }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        require_input(input, "a number")?;
        let mode = options.choice("mode", "normal", &["normal", "money"])?;
        let number = DecimalDigits::parse(input)?;
        Ok(match mode {
            "money" => to_money(&number),
            _ => to_chinese(&number),
        })
    }
}
