//! yaml-converter tool

use serde_json::Value;

use super::json_formatter::pretty_json;
use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

pub fn yaml_to_json(yaml: &str) -> Result<String> {
    let value: Value = serde_yaml::from_str(yaml)?;
    pretty_json(&value, 2)
}

pub fn json_to_yaml(json: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json)?;
    Ok(serde_yaml::to_string(&value)?.trim_end().to_string())
}

pub struct YamlConverterTool;

impl Tool for YamlConverterTool {
    fn id(&self) -> &'static str {
        "yaml-converter"
    }

    fn name(&self) -> &'static str {
        "YAML Converter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Convert between YAML and JSON formats"
    }

    fn icon(&self) -> &'static str {
        "🔄"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["yaml-to-json", "json-to-yaml"], "default": "yaml-to-json" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let text = require_input(input, "YAML or JSON")?;
        match options.choice("mode", "yaml-to-json", &["yaml-to-json", "json-to-yaml"])? {
            "json-to-yaml" => json_to_yaml(text)
                .map_err(|e| OktoolsError::InvalidInput(format!("invalid JSON: {}", e))),
            _ => yaml_to_json(text)
                .map_err(|e| OktoolsError::InvalidInput(format!("invalid YAML: {}", e))),
        }
    }
}
