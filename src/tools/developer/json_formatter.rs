//! json-formatter tool - pretty-print or minify JSON

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

pub struct JsonFormatterTool;

/// Serialize `value` with `indent` spaces per level, keeping key order
pub(crate) fn pretty_json(value: &Value, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Tool for JsonFormatterTool {
    fn id(&self) -> &'static str {
        "json-formatter"
    }

    fn name(&self) -> &'static str {
        "JSON Formatter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Format and prettify JSON data"
    }

    fn icon(&self) -> &'static str {
        "📋"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["format", "minify"], "default": "format" },
                "indent": { "type": "integer", "default": 2, "description": "Spaces per level (1-8)" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let text = require_input(input, "JSON")?;
        let mode = options.choice("mode", "format", &["format", "minify"])?;
        let parsed: Value = serde_json::from_str(text)?;

        match mode {
            "minify" => Ok(serde_json::to_string(&parsed)?),
            _ => {
                let indent = options.uint_in("indent", 2, 1..=8)? as usize;
                pretty_json(&parsed, indent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, options: ToolOptions) -> Result<String> {
        JsonFormatterTool.process(input, &options)
    }

    #[test]
    fn test_format_default_indent() {
        let out = run(r#"{"b":1,"a":[1,2]}"#, ToolOptions::new()).unwrap();
        assert_eq!(out, "{\n  \"b\": 1,\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn test_format_preserves_key_order() {
        let out = run(r#"{"zeta":1,"alpha":2}"#, ToolOptions::new()).unwrap();
        assert!(out.find("zeta").unwrap() < out.find("alpha").unwrap());
    }

    #[test]
    fn test_format_custom_indent() {
        let out = run(r#"{"a":1}"#, ToolOptions::new().with("indent", 4)).unwrap();
        assert_eq!(out, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_minify() {
        let out = run("{\n  \"a\": [1, 2],\n  \"b\": null\n}", ToolOptions::new().with("mode", "minify")).unwrap();
        assert_eq!(out, r#"{"a":[1,2],"b":null}"#);
    }

    #[test]
    fn test_format_minify_format_is_idempotent() {
        let src = r#"{"name":"x","tags":["a","b"],"nested":{"k":true,"n":1.5}}"#;
        let formatted = run(src, ToolOptions::new()).unwrap();
        let minified = run(&formatted, ToolOptions::new().with("mode", "minify")).unwrap();
        let reformatted = run(&minified, ToolOptions::new()).unwrap();
        assert_eq!(formatted, reformatted);
    }

    #[test]
    fn test_invalid_json() {
        assert!(run("{not json", ToolOptions::new()).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(run("   ", ToolOptions::new()).is_err());
    }

    #[test]
    fn test_indent_out_of_range() {
        assert!(run("{}", ToolOptions::new().with("indent", 12)).is_err());
    }
}
