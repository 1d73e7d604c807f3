//! Tool catalog
//!
//! Holds the registered tools in navigation order and provides lookup,
//! category grouping, and search.

use std::collections::HashMap;

use crate::error::{OktoolsError, Result};

use super::definition::{Tool, ToolCategory};
use super::{developer, encryption, image, text, time, utilities};

/// Ordered registry of tools, keyed by id
pub struct ToolCatalog {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<&'static str, usize>,
}

impl ToolCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Catalog with every built-in tool, in navigation order
    pub fn with_builtins() -> Self {
        let builtins: Vec<Box<dyn Tool>> = vec![
            Box::new(developer::JsonFormatterTool),
            Box::new(developer::RegexTesterTool),
            Box::new(developer::HashCalculatorTool),
            Box::new(developer::ColorConverterTool),
            Box::new(developer::JwtDecoderTool),
            Box::new(developer::JwtGeneratorTool),
            Box::new(developer::CronParserTool),
            Box::new(developer::BinaryConverterTool),
            Box::new(developer::JsonDiffTool),
            Box::new(developer::SqlFormatterTool),
            Box::new(developer::XmlFormatterTool),
            Box::new(developer::YamlConverterTool),
            Box::new(developer::ColorPickerTool),
            Box::new(developer::CronBuilderTool),
            Box::new(text::Base64Tool),
            Box::new(text::CaseConverterTool),
            Box::new(text::TextDedupTool),
            Box::new(text::LineCounterTool),
            Box::new(text::CharFrequencyTool),
            Box::new(text::HtmlEntitiesTool),
            Box::new(text::CsvToJsonTool),
            Box::new(text::MarkdownPreviewTool),
            Box::new(text::TextDiffTool),
            Box::new(text::NumberToChineseTool),
            Box::new(text::UrlTool),
            Box::new(text::LoremIpsumTool),
            Box::new(time::TimestampTool),
            Box::new(time::BatchTimestampTool),
            Box::new(image::ImageBase64Tool),
            Box::new(utilities::PasswordGeneratorTool),
            Box::new(utilities::UuidGeneratorTool),
            Box::new(utilities::IpConverterTool),
            Box::new(utilities::MimeLookupTool),
            Box::new(utilities::UserAgentParserTool),
            Box::new(utilities::UrlParserTool),
            Box::new(encryption::AesTool),
        ];

        let mut catalog = Self::new();
        for tool in builtins {
            if let Err(e) = catalog.add(tool) {
                log::warn!("Skipping built-in tool: {}", e);
            }
        }
        log::debug!("Registered {} built-in tools", catalog.len());
        catalog
    }

    /// Register a tool; ids must be unique
    pub fn add(&mut self, tool: Box<dyn Tool>) -> Result<()> {
        let id = tool.id();
        if self.index.contains_key(id) {
            return Err(OktoolsError::InvalidInput(format!(
                "a tool with id '{}' is already registered",
                id
            )));
        }
        self.index.insert(id, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by id
    pub fn get(&self, id: &str) -> Option<&dyn Tool> {
        self.index.get(id).map(|&i| self.tools[i].as_ref())
    }

    /// Get a tool by id or fail with `ToolNotFound`
    pub fn require(&self, id: &str) -> Result<&dyn Tool> {
        self.get(id)
            .ok_or_else(|| OktoolsError::ToolNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All tool ids, in registration order
    pub fn list(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.id()).collect()
    }

    /// All tools, in registration order
    pub fn all(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools in one category
    pub fn by_category(&self, category: ToolCategory) -> Vec<&dyn Tool> {
        self.all().filter(|t| t.category() == category).collect()
    }

    /// Case-insensitive match on name or description; an empty query matches everything
    pub fn search(&self, query: &str) -> Vec<&dyn Tool> {
        let query = query.trim().to_lowercase();
        self.all()
            .filter(|t| {
                query.is_empty()
                    || t.name().to_lowercase().contains(&query)
                    || t.description().to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Non-empty category groups in navigation order
    pub fn grouped(&self) -> Vec<(ToolCategory, Vec<&dyn Tool>)> {
        ToolCategory::ALL
            .iter()
            .map(|&c| (c, self.by_category(c)))
            .filter(|(_, tools)| !tools.is_empty())
            .collect()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}
