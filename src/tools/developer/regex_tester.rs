//! regex-tester tool - run a pattern against text and list matches

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

const SUPPORTED_FLAGS: &str = "gimsuy";

pub struct RegexTesterTool;

/// Parsed flag set
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Flags {
    global: bool,
    ignore_case: bool,
    multi_line: bool,
    dot_all: bool,
    sticky: bool,
}

impl Flags {
    fn parse(flags: &str) -> Result<Self> {
        let mut parsed = Flags::default();
        for c in flags.chars() {
            match c {
                'g' => parsed.global = true,
                'i' => parsed.ignore_case = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_all = true,
                'u' => {}
                'y' => parsed.sticky = true,
                other => {
                    return Err(OktoolsError::option(
                        "flags",
                        format!("unsupported flag '{}', expected any of {}", other, SUPPORTED_FLAGS),
                    ));
                }
            }
        }
        Ok(parsed)
    }

    fn build(&self, pattern: &str) -> Result<Regex> {
        Ok(RegexBuilder::new(pattern)
            .case_insensitive(self.ignore_case)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_all)
            .build()?)
    }
}

/// Next char boundary after `pos`, used to step past empty matches
fn step_past(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len() + 1)
}

fn find_matches<'t>(re: &Regex, text: &'t str, flags: Flags) -> Vec<&'t str> {
    if !flags.sticky {
        return if flags.global {
            re.find_iter(text).map(|m| m.as_str()).collect()
        } else {
            re.find(text).map(|m| m.as_str()).into_iter().collect()
        };
    }

    // Sticky: every match must begin exactly where the previous one ended
    let mut found = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        match re.find_at(text, pos) {
            Some(m) if m.start() == pos => {
                found.push(m.as_str());
                if !flags.global {
                    break;
                }
                pos = if m.is_empty() { step_past(text, pos) } else { m.end() };
            }
            _ => break,
        }
    }
    found
}

impl Tool for RegexTesterTool {
    fn id(&self) -> &'static str {
        "regex-tester"
    }

    fn name(&self) -> &'static str {
        "Regex Tester"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Test regular expressions with real-time matching"
    }

    fn icon(&self) -> &'static str {
        "🔍"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": { "type": "string", "description": "Regular expression" },
                "flags": { "type": "string", "default": "", "description": "Any of g, i, m, s, u, y" }
            },
            "required": ["pattern"]
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let pattern = options.require_str("pattern")?;
        if input.is_empty() {
            return Err(OktoolsError::InvalidInput(
                "enter test text to see matches".to_string(),
            ));
        }
        let flags = Flags::parse(&options.str_or("flags", "")?)?;
        let re = flags.build(pattern.trim())?;

        let matches = find_matches(&re, input, flags);
        if matches.is_empty() {
            return Ok("No matches found".to_string());
        }

        let mut lines = vec![format!("Found {} matches:", matches.len())];
        lines.extend(
            matches
                .iter()
                .enumerate()
                .map(|(i, m)| format!("#{}: {}", i + 1, m)),
        );
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, pattern: &str, flags: &str) -> Result<String> {
        let opts = ToolOptions::new().with("pattern", pattern).with("flags", flags);
        RegexTesterTool.process(text, &opts)
    }

    #[test]
    fn test_single_match_without_global() {
        let out = run("a1 b2 c3", r"\d", "").unwrap();
        assert_eq!(out, "Found 1 matches:\n#1: 1");
    }

    #[test]
    fn test_global_matches() {
        let out = run("a1 b2 c3", r"\d", "g").unwrap();
        assert_eq!(out, "Found 3 matches:\n#1: 1\n#2: 2\n#3: 3");
    }

    #[test]
    fn test_ignore_case() {
        let out = run("Hello HELLO hello", "hello", "gi").unwrap();
        assert!(out.starts_with("Found 3 matches"));
    }

    #[test]
    fn test_multiline_anchor() {
        let out = run("one\ntwo\nthree", "^t\\w+", "gm").unwrap();
        assert_eq!(out, "Found 2 matches:\n#1: two\n#2: three");
    }

    #[test]
    fn test_sticky_stops_at_gap() {
        let out = run("aaXaa", "a", "gy").unwrap();
        assert_eq!(out, "Found 2 matches:\n#1: a\n#2: a");
    }

    #[test]
    fn test_sticky_requires_match_at_start() {
        let out = run("xa", "a", "y").unwrap();
        assert_eq!(out, "No matches found");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(run("abc", r"\d", "g").unwrap(), "No matches found");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = run("abc", "(", "").unwrap_err();
        assert!(matches!(err, OktoolsError::Regex(_)));
    }

    #[test]
    fn test_unknown_flag() {
        assert!(run("abc", "a", "q").is_err());
    }

    #[test]
    fn test_pattern_required() {
        assert!(RegexTesterTool.process("abc", &ToolOptions::new()).is_err());
    }
}
