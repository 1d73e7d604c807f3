//! line-counter tool

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").expect("valid regex"));

/// Counts reported by the line counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub lines: usize,
    pub non_empty_lines: usize,
    pub chars: usize,
    pub chars_no_whitespace: usize,
    pub words: usize,
    pub paragraphs: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let lines: Vec<&str> = text.split('\n').collect();
        Self {
            lines: lines.len(),
            non_empty_lines: lines.iter().filter(|l| !l.trim().is_empty()).count(),
            chars: text.chars().count(),
            chars_no_whitespace: text.chars().filter(|c| !c.is_whitespace()).count(),
            words: text.split_whitespace().count(),
            paragraphs: PARAGRAPH_BREAK
                .split(text)
                .filter(|p| !p.trim().is_empty())
                .count(),
        }
    }
}

pub struct LineCounterTool;

impl Tool for LineCounterTool {
    fn id(&self) -> &'static str {
        "line-counter"
    }

    fn name(&self) -> &'static str {
        "Line Counter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Count lines, characters, and words"
    }

    fn icon(&self) -> &'static str {
        "📊"
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        let stats = TextStats::of(input);
        Ok(format!(
            "Lines: {}\nNon-empty lines: {}\nCharacters: {}\nCharacters (no whitespace): {}\nWords: {}\nParagraphs: {}",
            stats.lines,
            stats.non_empty_lines,
            stats.chars,
            stats.chars_no_whitespace,
            stats.words,
            stats.paragraphs
        ))
    }
}
