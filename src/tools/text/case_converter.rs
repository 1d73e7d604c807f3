//! case-converter tool

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

const MODES: [&str; 6] = ["upper", "lower", "capitalize", "title", "toggle", "camel"];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w\S*").expect("valid regex"));
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_\s]+(.)?").expect("valid regex"));

/// Uppercase the first character and lowercase the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

pub fn convert_case(text: &str, mode: &str) -> String {
    match mode {
        "upper" => text.to_uppercase(),
        "capitalize" => capitalize(text),
        "title" => WORD
            .replace_all(text, |caps: &Captures| capitalize(&caps[0]))
            .into_owned(),
        "toggle" => text
            .chars()
            .flat_map(|c| -> Box<dyn Iterator<Item = char>> {
                if c.is_uppercase() {
                    Box::new(c.to_lowercase())
                } else if c.is_lowercase() {
                    Box::new(c.to_uppercase())
                } else {
                    Box::new(std::iter::once(c))
                }
            })
            .collect(),
        "camel" => {
            let joined = SEPARATOR.replace_all(text, |caps: &Captures| {
                caps.get(1).map(|m| m.as_str().to_uppercase()).unwrap_or_default()
            });
            let mut chars = joined.chars();
            match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => text.to_lowercase(),
    }
}

pub struct CaseConverterTool;

impl Tool for CaseConverterTool {
    fn id(&self) -> &'static str {
        "case-converter"
    }

    fn name(&self) -> &'static str {
        "Case Converter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Convert text between different cases"
    }

    fn icon(&self) -> &'static str {
        "🔤"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": MODES, "default": "lower" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        if input.is_empty() {
            return Err(OktoolsError::InvalidInput("please enter text to convert".to_string()));
        }
        let mode = options.choice("mode", "lower", &MODES)?;
        Ok(convert_case(input, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_lower() {
        assert_eq!(convert_case("Hello World", "upper"), "HELLO WORLD");
        assert_eq!(convert_case("Hello World", "lower"), "hello world");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(convert_case("hELLO wORLD", "capitalize"), "Hello world");
    }

    #[test]
    fn test_title() {
        assert_eq!(convert_case("the QUICK brown-fox (jumps)", "title"), "The Quick Brown-fox (Jumps)");
    }

    #[test]
    fn test_toggle() {
        assert_eq!(convert_case("Hello, World 1", "toggle"), "hELLO, wORLD 1");
    }

    #[test]
    fn test_camel() {
        assert_eq!(convert_case("hello world-foo_bar", "camel"), "helloWorldFooBar");
        assert_eq!(convert_case("Some Title", "camel"), "someTitle");
        assert_eq!(convert_case("trailing-", "camel"), "trailing");
    }

    #[test]
    fn test_default_mode_is_lower() {
        assert_eq!(CaseConverterTool.process("ABC", &ToolOptions::new()).unwrap(), "abc");
        let opts = ToolOptions::new().with("mode", "shout");
        assert!(CaseConverterTool.process("ABC", &opts).is_err());
    }
}
