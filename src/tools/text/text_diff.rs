//! text-diff tool - line-level comparison of two texts

use serde_json::Value;
use similar::{ChangeTag, TextDiff};

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Removed,
    Added,
    Unchanged,
}

impl LineChange {
    fn marker(&self) -> &'static str {
        match self {
            LineChange::Removed => "-",
            LineChange::Added => "+",
            LineChange::Unchanged => " ",
        }
    }
}

fn normalize(text: &str, ignore_case: bool, ignore_whitespace: bool) -> Vec<String> {
    text.split('\n')
        .map(|line| {
            let mut line = line.trim_end_matches('\r').to_string();
            if ignore_case {
                line = line.to_lowercase();
            }
            if ignore_whitespace {
                line = line.split_whitespace().collect::<Vec<_>>().join(" ");
            }
            line
        })
        .collect()
}

/// Pair lines by position: equal lines are kept, others become a remove/add pair
pub fn positional_diff(old: &[String], new: &[String]) -> Vec<(LineChange, String)> {
    let mut changes = Vec::new();
    for i in 0..old.len().max(new.len()) {
        match (old.get(i), new.get(i)) {
            (Some(a), Some(b)) if a == b => changes.push((LineChange::Unchanged, a.clone())),
            (Some(a), Some(b)) => {
                changes.push((LineChange::Removed, a.clone()));
                changes.push((LineChange::Added, b.clone()));
            }
            (Some(a), None) => changes.push((LineChange::Removed, a.clone())),
            (None, Some(b)) => changes.push((LineChange::Added, b.clone())),
            (None, None) => {}
        }
    }
    changes
}

/// Minimal edit script via Myers' algorithm
pub fn myers_diff(old: &[String], new: &[String]) -> Vec<(LineChange, String)> {
    let old: Vec<&str> = old.iter().map(String::as_str).collect();
    let new: Vec<&str> = new.iter().map(String::as_str).collect();
    let diff = TextDiff::from_slices(&old, &new);
    diff.iter_all_changes()
        .map(|change| {
            let kind = match change.tag() {
                ChangeTag::Delete => LineChange::Removed,
                ChangeTag::Insert => LineChange::Added,
                ChangeTag::Equal => LineChange::Unchanged,
            };
            (kind, change.value().to_string())
        })
        .collect()
}

pub struct TextDiffTool;

impl Tool for TextDiffTool {
    fn id(&self) -> &'static str {
        "text-diff"
    }

    fn name(&self) -> &'static str {
        "Text Diff"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Compare two texts and show differences"
    }

    fn icon(&self) -> &'static str {
        "📝"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "right": { "type": "string", "description": "New text to compare against the input" },
                "ignore_whitespace": { "type": "boolean", "default": false },
                "ignore_case": { "type": "boolean", "default": false },
                "algorithm": { "type": "string", "enum": ["positional", "myers"], "default": "positional" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let right = options.str_or("right", "")?;
        if input.is_empty() && right.is_empty() {
            return Err(OktoolsError::InvalidInput("enter text on at least one side".to_string()));
        }
        let ignore_case = options.bool_or("ignore_case", false)?;
        let ignore_whitespace = options.bool_or("ignore_whitespace", false)?;
        let old = normalize(input, ignore_case, ignore_whitespace);
        let new = normalize(&right, ignore_case, ignore_whitespace);

        let changes = match options.choice("algorithm", "positional", &["positional", "myers"])? {
            "myers" => myers_diff(&old, &new),
            _ => positional_diff(&old, &new),
        };

        let count = |kind: LineChange| changes.iter().filter(|(k, _)| *k == kind).count();
        let mut lines = vec![format!(
            "🔴 Removed: {} | 🟢 Added: {} | ⚪ Unchanged: {}",
            count(LineChange::Removed),
            count(LineChange::Added),
            count(LineChange::Unchanged)
        )];
        lines.extend(changes.iter().map(|(kind, content)| {
            let content = if content.is_empty() { "(empty line)" } else { content };
            format!("{} {}", kind.marker(), content)
        }));
        Ok(lines.join("\n"))
    }
}
