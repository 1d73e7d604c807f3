//! character-frequency tool

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

/// Analysis switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyOptions {
    pub by_word: bool,
    pub case_sensitive: bool,
    pub ignore_spaces: bool,
    pub ignore_punctuation: bool,
}

impl Default for FrequencyOptions {
    fn default() -> Self {
        Self {
            by_word: false,
            case_sensitive: false,
            ignore_spaces: true,
            ignore_punctuation: true,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_punctuation(c: char) -> bool {
    !is_word_char(c) && !c.is_whitespace()
}

/// Counts in first-seen order
pub fn count_frequency(text: &str, opts: FrequencyOptions) -> IndexMap<String, usize> {
    let text = if opts.case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    };
    let mut counts: IndexMap<String, usize> = IndexMap::new();

    if opts.by_word {
        for word in text.split_whitespace() {
            let word: String = if opts.ignore_punctuation {
                word.chars().filter(|c| is_word_char(*c)).collect()
            } else {
                word.to_string()
            };
            if !word.is_empty() {
                *counts.entry(word).or_default() += 1;
            }
        }
    } else {
        for c in text.chars() {
            if opts.ignore_spaces && c.is_whitespace() {
                continue;
            }
            if opts.ignore_punctuation && is_punctuation(c) {
                continue;
            }
            *counts.entry(c.to_string()).or_default() += 1;
        }
    }
    counts
}

fn label(item: &str) -> &str {
    match item {
        " " => "(space)",
        "\n" => "(newline)",
        "\t" => "(tab)",
        other => other,
    }
}

pub struct CharFrequencyTool;

impl Tool for CharFrequencyTool {
    fn id(&self) -> &'static str {
        "character-frequency"
    }

    fn name(&self) -> &'static str {
        "Character Frequency"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Count character and word frequency in text"
    }

    fn icon(&self) -> &'static str {
        "📊"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["char", "word"], "default": "char" },
                "case_sensitive": { "type": "boolean", "default": false },
                "ignore_spaces": { "type": "boolean", "default": true },
                "ignore_punctuation": { "type": "boolean", "default": true }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        if input.is_empty() {
            return Err(OktoolsError::InvalidInput("please enter text to analyze".to_string()));
        }
        let opts = FrequencyOptions {
            by_word: options.choice("mode", "char", &["char", "word"])? == "word",
            case_sensitive: options.bool_or("case_sensitive", false)?,
            ignore_spaces: options.bool_or("ignore_spaces", true)?,
            ignore_punctuation: options.bool_or("ignore_punctuation", true)?,
        };

        let counts = count_frequency(input, opts);
        if counts.is_empty() {
            return Err(OktoolsError::InvalidInput("nothing left to count".to_string()));
        }

        let mut sorted: Vec<(&String, &usize)> = counts.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1));
        let total: usize = sorted.iter().map(|(_, n)| **n).sum();

        let mut lines = vec![format!("Total: {} | Unique: {}", total, sorted.len())];
        lines.extend(sorted.iter().map(|(item, count)| {
            let pct = **count as f64 / total as f64 * 100.0;
            format!("{}: {} ({:.1}%)", label(item), count, pct)
        }));
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_counts_case_insensitive() {
        let counts = count_frequency("AaB, b!", FrequencyOptions::default());
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&2));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_case_sensitive_with_spaces() {
        let opts = FrequencyOptions {
            case_sensitive: true,
            ignore_spaces: false,
            ..Default::default()
        };
        let counts = count_frequency("A a", opts);
        assert_eq!(counts.get("A"), Some(&1));
        assert_eq!(counts.get(" "), Some(&1));
    }

    #[test]
    fn test_unicode_letters_are_not_punctuation() {
        let counts = count_frequency("été, 你好", FrequencyOptions::default());
        assert_eq!(counts.get("é"), Some(&2));
        assert_eq!(counts.get("你"), Some(&1));
        assert!(counts.get(",").is_none());
    }

    #[test]
    fn test_word_mode_strips_punctuation() {
        let opts = FrequencyOptions { by_word: true, ..Default::default() };
        let counts = count_frequency("The cat. the CAT! a dog", opts);
        assert_eq!(counts.get("the"), Some(&2));
        assert_eq!(counts.get("cat"), Some(&2));
        assert_eq!(counts.get("dog"), Some(&1));
    }

    #[test]
    fn test_output_sorted_with_stable_ties() {
        let out = CharFrequencyTool.process("abcab", &ToolOptions::new()).unwrap();
        assert_eq!(out, "Total: 5 | Unique: 3\na: 2 (40.0%)\nb: 2 (40.0%)\nc: 1 (20.0%)");
    }

    #[test]
    fn test_whitespace_labels() {
        let opts = ToolOptions::new().with("ignore_spaces", false);
        let out = CharFrequencyTool.process("a a\n", &opts).unwrap();
        assert!(out.contains("(space): 1"));
        assert!(out.contains("(newline): 1"));
    }

    #[test]
    fn test_only_punctuation_is_error() {
        assert!(CharFrequencyTool.process("!!", &ToolOptions::new()).is_err());
    }
}
