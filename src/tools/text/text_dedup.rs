//! text-dedup tool - drop blank and repeated lines, optionally sort

use indexmap::IndexSet;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

pub struct TextDedupTool;

impl Tool for TextDedupTool {
    fn id(&self) -> &'static str {
        "text-dedup"
    }

    fn name(&self) -> &'static str {
        "Text Dedup & Sort"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Remove duplicates and sort text lines"
    }

    fn icon(&self) -> &'static str {
        "📝"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "sort": { "type": "string", "enum": ["none", "asc", "desc"], "default": "none" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let sort = options.choice("sort", "none", &["none", "asc", "desc"])?;
        let unique: IndexSet<&str> = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();
        if unique.is_empty() {
            return Err(OktoolsError::InvalidInput("no non-empty lines".to_string()));
        }

        let mut lines: Vec<&str> = unique.into_iter().collect();
        match sort {
            "asc" => lines.sort(),
            "desc" => lines.sort_by(|a, b| b.cmp(a)),
            _ => {}
        }
        log::debug!("text-dedup kept {} lines", lines.len());
        Ok(lines.join("\n"))
    }
}
