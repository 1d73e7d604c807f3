//! json-diff tool - structural comparison of two JSON documents

use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Added { path: String, new: Value },
    Removed { path: String, old: Value },
    Changed { path: String, old: Value, new: Value },
}

impl Change {
    fn line(&self) -> String {
        match self {
            Change::Removed { path, old } => format!("🔴 {}: {}", path, old),
            Change::Added { path, new } => format!("🟢 {}: {}", path, new),
            Change::Changed { path, old, new } => format!("🟡 {}: {} → {}", path, old, new),
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Recursive comparison; arrays are compared index by index
pub fn diff(left: &Value, right: &Value, path: &str, out: &mut Vec<Change>) {
    match (left, right) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, old) in a {
                let p = join(path, key);
                match b.get(key) {
                    Some(new) => diff(old, new, &p, out),
                    None => out.push(Change::Removed { path: p, old: old.clone() }),
                }
            }
            for (key, new) in b.iter().filter(|(k, _)| !a.contains_key(*k)) {
                out.push(Change::Added {
                    path: join(path, key),
                    new: new.clone(),
                });
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            for i in 0..a.len().max(b.len()) {
                let p = join(path, &i.to_string());
                match (a.get(i), b.get(i)) {
                    (Some(old), Some(new)) => diff(old, new, &p, out),
                    (Some(old), None) => out.push(Change::Removed { path: p, old: old.clone() }),
                    (None, Some(new)) => out.push(Change::Added { path: p, new: new.clone() }),
                    (None, None) => {}
                }
            }
        }
        (old, new) if old != new => out.push(Change::Changed {
            path: if path.is_empty() { "(root)".to_string() } else { path.to_string() },
            old: old.clone(),
            new: new.clone(),
        }),
        _ => {}
    }
}

fn parse_side(text: &str, side: &str) -> Result<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
        .map_err(|e| OktoolsError::InvalidInput(format!("{} JSON is invalid: {}", side, e)))
}

pub struct JsonDiffTool;

impl Tool for JsonDiffTool {
    fn id(&self) -> &'static str {
        "json-diff"
    }

    fn name(&self) -> &'static str {
        "JSON Diff"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Compare two JSON objects and show differences"
    }

    fn icon(&self) -> &'static str {
        "📊"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "right": { "type": "string", "description": "JSON document to compare against the input" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let right_text = options.str_or("right", "")?;
        if input.trim().is_empty() && right_text.trim().is_empty() {
            return Err(OktoolsError::InvalidInput(
                "enter JSON on at least one side".to_string(),
            ));
        }
        let left = parse_side(input, "left")?;
        let right = parse_side(&right_text, "right")?;

        let mut changes = Vec::new();
        diff(&left, &right, "", &mut changes);
        if changes.is_empty() {
            return Ok("✓ The two JSON documents are identical".to_string());
        }

        let count = |f: fn(&Change) -> bool| changes.iter().filter(|c| f(c)).count();
        let mut lines = vec![format!(
            "🔴 Removed: {} | 🟢 Added: {} | 🟡 Changed: {}",
            count(|c| matches!(c, Change::Removed { .. })),
            count(|c| matches!(c, Change::Added { .. })),
            count(|c| matches!(c, Change::Changed { .. })),
        )];
        lines.extend(changes.iter().map(Change::line));
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(left: &str, right: &str) -> Result<String> {
        JsonDiffTool.process(left, &ToolOptions::new().with("right", right))
    }

    #[test]
    fn test_identical() {
        let out = run(r#"{"a": 1, "b": [1, 2]}"#, r#"{"b": [1, 2], "a": 1}"#).unwrap();
        assert!(out.contains("identical"));
    }

    #[test]
    fn test_nested_changes() {
        let left = json!({"name": "John", "age": 30, "address": {"city": "NYC"}});
        let right = json!({"name": "John", "age": 32, "address": {"city": "Boston", "zip": "02101"}, "email": "j@x.io"});
        let mut changes = Vec::new();
        diff(&left, &right, "", &mut changes);
        assert_eq!(
            changes,
            vec![
                Change::Changed { path: "age".into(), old: json!(30), new: json!(32) },
                Change::Changed { path: "address.city".into(), old: json!("NYC"), new: json!("Boston") },
                Change::Added { path: "address.zip".into(), new: json!("02101") },
                Change::Added { path: "email".into(), new: json!("j@x.io") },
            ]
        );
    }

    #[test]
    fn test_arrays_by_index() {
        let mut changes = Vec::new();
        diff(&json!({"xs": [1, 2, 3]}), &json!({"xs": [1, 5]}), "", &mut changes);
        assert_eq!(
            changes,
            vec![
                Change::Changed { path: "xs.1".into(), old: json!(2), new: json!(5) },
                Change::Removed { path: "xs.2".into(), old: json!(3) },
            ]
        );
    }

    #[test]
    fn test_summary_line() {
        let out = run(r#"{"a": 1, "b": 2}"#, r#"{"a": 2, "c": 3}"#).unwrap();
        let first = out.lines().next().unwrap();
        assert_eq!(first, "🔴 Removed: 1 | 🟢 Added: 1 | 🟡 Changed: 1");
        assert!(out.contains("🟡 a: 1 → 2"));
    }

    #[test]
    fn test_empty_side_is_null() {
        let out = run("", r#"{"a": 1}"#).unwrap();
        assert!(out.contains("🟡 (root): null → {\"a\":1}"));
    }

    #[test]
    fn test_invalid_json() {
        let err = run("{", "{}").unwrap_err();
        assert!(err.to_string().contains("left"));
        assert!(run("", "").is_err());
    }
}
