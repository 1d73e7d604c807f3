//! uuid-generator tool

use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

pub struct UuidGeneratorTool;

impl Tool for UuidGeneratorTool {
    fn id(&self) -> &'static str {
        "uuid-generator"
    }

    fn name(&self) -> &'static str {
        "UUID Generator"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Utilities
    }

    fn description(&self) -> &'static str {
        "Generate UUID v4 identifiers"
    }

    fn icon(&self) -> &'static str {
        "🆔"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "count": { "type": "integer", "minimum": 1, "maximum": 10, "default": 1 }
            }
        })
    }

    fn process(&self, _input: &str, options: &ToolOptions) -> Result<String> {
        let count = options.uint_in("count", 1, 1..=10)?;
        Ok((0..count)
            .map(|_| Uuid::new_v4().to_string())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
