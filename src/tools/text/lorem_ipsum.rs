//! lorem-ipsum tool - placeholder text generator

use rand::Rng;
use serde_json::Value;

use crate::error::Result;
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

const VOCABULARY: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in", "reprehenderit",
    "voluptate", "velit", "esse", "cillum", "eu", "fugiat", "nulla", "pariatur", "excepteur",
    "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum", "dolorum",
];

const SENTENCE_WORDS: std::ops::RangeInclusive<usize> = 4..=11;

/// How much text to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoremUnit {
    Paragraphs { paragraphs: usize, sentences: usize },
    Words(usize),
    Bytes(usize),
}

fn word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    VOCABULARY[rng.random_range(0..VOCABULARY.len())]
}

fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let length = rng.random_range(SENTENCE_WORDS);
    let words: Vec<&str> = (0..length).map(|_| word(rng)).collect();
    let mut text = words.join(" ");
    if let Some(first) = text.get(0..1) {
        let upper = first.to_ascii_uppercase();
        text.replace_range(0..1, &upper);
    }
    text.push('.');
    text
}

fn paragraph<R: Rng + ?Sized>(rng: &mut R, sentences: usize) -> String {
    (0..sentences).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

pub fn generate<R: Rng + ?Sized>(rng: &mut R, unit: LoremUnit) -> String {
    match unit {
        LoremUnit::Paragraphs { paragraphs, sentences } => (0..paragraphs)
            .map(|_| paragraph(rng, sentences))
            .collect::<Vec<_>>()
            .join("\n\n"),
        LoremUnit::Words(count) => (0..count).map(|_| word(rng)).collect::<Vec<_>>().join(" "),
        LoremUnit::Bytes(count) => {
            let mut text = String::new();
            while text.len() < count {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&sentence(rng));
            }
            // vocabulary is ASCII so any byte offset is a char boundary
            text.truncate(count);
            text.trim_end().to_string()
        }
    }
}

pub struct LoremIpsumTool;

impl LoremIpsumTool {
    fn unit(options: &ToolOptions) -> Result<LoremUnit> {
        Ok(match options.choice("unit", "paragraphs", &["paragraphs", "words", "bytes"])? {
            "words" => LoremUnit::Words(options.uint_in("count", 50, 1..=1000)? as usize),
            "bytes" => LoremUnit::Bytes(options.uint_in("count", 200, 1..=10_000)? as usize),
            _ => LoremUnit::Paragraphs {
                paragraphs: options.uint_in("paragraphs", 3, 1..=10)? as usize,
                sentences: options.uint_in("sentences", 5, 1..=10)? as usize,
            },
        })
    }
}

impl Tool for LoremIpsumTool {
    fn id(&self) -> &'static str {
        "lorem-ipsum"
    }

    fn name(&self) -> &'static str {
        "Lorem Ipsum Generator"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Generate random placeholder text"
    }

    fn icon(&self) -> &'static str {
        "📄"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "unit": { "type": "string", "enum": ["paragraphs", "words", "bytes"], "default": "paragraphs" },
                "paragraphs": { "type": "integer", "minimum": 1, "maximum": 10, "default": 3 },
                "sentences": { "type": "integer", "minimum": 1, "maximum": 10, "default": 5 },
                "count": { "type": "integer", "description": "Words (1-1000, default 50) or bytes (1-10000, default 200)" }
            }
        })
    }

    fn process(&self, _input: &str, options: &ToolOptions) -> Result<String> {
        let unit = Self::unit(options)?;
        Ok(generate(&mut rand::rng(), unit))
    }
}
