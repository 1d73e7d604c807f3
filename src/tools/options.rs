//! Tool options
//!
//! Options arrive either as typed JSON (programmatic callers, config defaults)
//! or as strings (`-o key=value` on the command line), so every accessor
//! accepts both forms.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{OktoolsError, Result};

/// Key/value options passed to `Tool::process`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolOptions(Map<String, Value>);

impl ToolOptions {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from a JSON value, which must be an object (or null)
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(OktoolsError::InvalidInput(format!(
                "options must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Layer these options over `defaults`; keys present here win
    pub fn merged_over(&self, defaults: &ToolOptions) -> ToolOptions {
        let mut merged = defaults.0.clone();
        for (key, value) in &self.0 {
            merged.insert(key.clone(), value.clone());
        }
        ToolOptions(merged)
    }

    /// String value, with numbers and booleans rendered as text
    pub fn string(&self, name: &str) -> Result<Option<String>> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(OktoolsError::option(
                name,
                format!("expected a string, got {}", other),
            )),
        }
    }

    pub fn str_or(&self, name: &str, default: &str) -> Result<String> {
        Ok(self.string(name)?.unwrap_or_else(|| default.to_string()))
    }

    /// Required string option
    pub fn require_str(&self, name: &str) -> Result<String> {
        match self.string(name)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(OktoolsError::option(name, "is required")),
        }
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => Ok(n.as_i64().unwrap_or(0) != 0),
            Some(Value::String(s)) => match s.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(OktoolsError::option(name, format!("expected a boolean, got '{}'", s))),
            },
            Some(other) => Err(OktoolsError::option(
                name,
                format!("expected a boolean, got {}", other),
            )),
        }
    }

    /// Unsigned integer constrained to `range`
    pub fn uint_in(&self, name: &str, default: u64, range: RangeInclusive<u64>) -> Result<u64> {
        let value = match self.0.get(name) {
            None | Some(Value::Null) => default,
            Some(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| OktoolsError::option(name, format!("expected an integer, got {}", n)))?,
            Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| {
                OktoolsError::option(name, format!("expected an integer, got '{}'", s))
            })?,
            Some(other) => {
                return Err(OktoolsError::option(
                    name,
                    format!("expected an integer, got {}", other),
                ));
            }
        };

        if !range.contains(&value) {
            return Err(OktoolsError::option(
                name,
                format!("must be between {} and {}", range.start(), range.end()),
            ));
        }
        Ok(value)
    }

    /// One of `allowed`, matched case-insensitively; returns the canonical spelling
    pub fn choice(&self, name: &str, default: &'static str, allowed: &[&'static str]) -> Result<&'static str> {
        let Some(value) = self.string(name)? else {
            return Ok(default);
        };
        allowed
            .iter()
            .find(|a| a.eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or_else(|| {
                OktoolsError::option(
                    name,
                    format!("'{}' is not one of: {}", value, allowed.join(", ")),
                )
            })
    }
}

impl From<Map<String, Value>> for ToolOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_coercion() {
        let opts = ToolOptions::new().with("a", "x").with("b", 4).with("c", true);
        assert_eq!(opts.string("a").unwrap(), Some("x".to_string()));
        assert_eq!(opts.string("b").unwrap(), Some("4".to_string()));
        assert_eq!(opts.string("c").unwrap(), Some("true".to_string()));
        assert_eq!(opts.string("missing").unwrap(), None);
    }

    #[test]
    fn test_string_rejects_objects() {
        let opts = ToolOptions::new().with("a", json!({"k": 1}));
        assert!(opts.string("a").is_err());
    }

    #[test]
    fn test_require_str() {
        let opts = ToolOptions::new().with("key", "secret").with("empty", "");
        assert_eq!(opts.require_str("key").unwrap(), "secret");
        assert!(opts.require_str("empty").is_err());
        assert!(opts.require_str("missing").is_err());
    }

    #[test]
    fn test_bool_from_strings() {
        let opts = ToolOptions::new()
            .with("t", "true")
            .with("y", "YES")
            .with("f", "0")
            .with("b", false)
            .with("bad", "maybe");
        assert!(opts.bool_or("t", false).unwrap());
        assert!(opts.bool_or("y", false).unwrap());
        assert!(!opts.bool_or("f", true).unwrap());
        assert!(!opts.bool_or("b", true).unwrap());
        assert!(opts.bool_or("missing", true).unwrap());
        assert!(opts.bool_or("bad", true).is_err());
    }

    #[test]
    fn test_uint_in_range() {
        let opts = ToolOptions::new().with("n", "4").with("big", 99).with("neg", -1);
        assert_eq!(opts.uint_in("n", 2, 1..=8).unwrap(), 4);
        assert_eq!(opts.uint_in("missing", 2, 1..=8).unwrap(), 2);
        assert!(opts.uint_in("big", 2, 1..=8).is_err());
        assert!(opts.uint_in("neg", 2, 1..=8).is_err());
    }

    #[test]
    fn test_choice_is_case_insensitive() {
        let opts = ToolOptions::new().with("alg", "hs512");
        let alg = opts.choice("alg", "HS256", &["HS256", "HS384", "HS512"]).unwrap();
        assert_eq!(alg, "HS512");
        assert_eq!(opts.choice("missing", "HS256", &["HS256"]).unwrap(), "HS256");
    }

    #[test]
    fn test_choice_rejects_unknown() {
        let opts = ToolOptions::new().with("mode", "sideways");
        let err = opts.choice("mode", "encode", &["encode", "decode"]).unwrap_err();
        assert!(err.to_string().contains("encode, decode"));
    }

    #[test]
    fn test_merged_over_prefers_explicit() {
        let defaults = ToolOptions::new().with("indent", 4).with("mode", "format");
        let explicit = ToolOptions::new().with("indent", 2);
        let merged = explicit.merged_over(&defaults);
        assert_eq!(merged.get("indent"), Some(&json!(2)));
        assert_eq!(merged.get("mode"), Some(&json!("format")));
    }

    #[test]
    fn test_from_value() {
        assert!(ToolOptions::from_value(json!({"a": 1})).is_ok());
        assert!(ToolOptions::from_value(Value::Null).unwrap().is_empty());
        assert!(ToolOptions::from_value(json!([1, 2])).is_err());
    }
}
