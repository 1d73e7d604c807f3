//! Tool definitions and category classification
//!
//! Every tool implements the same contract: it describes itself, renders a
//! declarative surface from its option schema, and processes input strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OktoolsError, Result};

use super::options::ToolOptions;

/// Glyph prefixed to every user-facing error string
pub const ERROR_GLYPH: &str = "❌";

/// Category determines where a tool is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// Formatters, encoders and inspectors for code and data
    Developer,
    /// Plain-text transformations and statistics
    Text,
    /// Symmetric encryption
    Encryption,
    /// Timestamp and date conversion
    Time,
    /// Image encoding
    Image,
    /// Generators and lookups
    Utilities,
}

impl ToolCategory {
    /// All categories in navigation order
    pub const ALL: [ToolCategory; 6] = [
        Self::Developer,
        Self::Text,
        Self::Encryption,
        Self::Time,
        Self::Image,
        Self::Utilities,
    ];

    /// Parse from string representation
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "developer" | "dev" => Some(Self::Developer),
            "text" => Some(Self::Text),
            "encryption" | "crypto" => Some(Self::Encryption),
            "time" => Some(Self::Time),
            "image" => Some(Self::Image),
            "utilities" | "utils" => Some(Self::Utilities),
            _ => None,
        }
    }

    /// Machine identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Text => "text",
            Self::Encryption => "encryption",
            Self::Time => "time",
            Self::Image => "image",
            Self::Utilities => "utilities",
        }
    }

    /// Heading shown in navigation
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Developer => "Developer Tools",
            Self::Text => "Text Processing",
            Self::Encryption => "Encryption",
            Self::Time => "Time & Number",
            Self::Image => "Image & Visual",
            Self::Utilities => "Utilities",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Developer => "💻",
            Self::Text => "📝",
            Self::Encryption => "🔐",
            Self::Time => "⏰",
            Self::Image => "🖼️",
            Self::Utilities => "🔧",
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A self-contained tool: metadata plus a pure string transformation
pub trait Tool: Send + Sync {
    /// Stable identifier used for lookup and persistence
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn category(&self) -> ToolCategory;

    fn description(&self) -> &'static str;

    fn icon(&self) -> &'static str;

    /// JSON schema describing accepted options
    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    /// Transform the input
    fn process(&self, input: &str, options: &ToolOptions) -> Result<String>;

    /// Declarative description of the tool's interactive surface
    fn render(&self) -> ToolSurface {
        ToolSurface::from_schema(
            self.id(),
            format!("{} {}", self.icon(), self.name()),
            self.description(),
            &self.options_schema(),
        )
    }
}

/// One configurable field of a tool surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceField {
    pub name: String,
    pub kind: String,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub choices: Vec<String>,
    pub required: bool,
}

/// Declarative view template derived from a tool's option schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSurface {
    pub tool_id: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<SurfaceField>,
}

impl ToolSurface {
    /// Build a surface from a JSON schema of the form
    /// `{"properties": {...}, "required": [...]}`
    pub fn from_schema(
        tool_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        schema: &Value,
    ) -> Self {
        let required: Vec<&str> = schema["required"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        let fields = schema["properties"]
            .as_object()
            .map(|props| {
                props
                    .iter()
                    .map(|(name, prop)| SurfaceField {
                        name: name.clone(),
                        kind: prop["type"].as_str().unwrap_or("string").to_string(),
                        description: prop["description"].as_str().map(str::to_string),
                        default: prop.get("default").cloned(),
                        choices: prop["enum"]
                            .as_array()
                            .map(|arr| {
                                arr.iter()
                                    .filter_map(|v| v.as_str().map(str::to_string))
                                    .collect()
                            })
                            .unwrap_or_default(),
                        required: required.contains(&name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            tool_id: tool_id.into(),
            title: title.into(),
            description: description.into(),
            fields,
        }
    }
}

impl fmt::Display for ToolSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.tool_id)?;
        writeln!(f, "  {}", self.description)?;
        if self.fields.is_empty() {
            return writeln!(f, "  (no options)");
        }
        writeln!(f, "  options:")?;
        for field in &self.fields {
            write!(f, "    {} <{}>", field.name, field.kind)?;
            if field.required {
                write!(f, " (required)")?;
            }
            if let Some(default) = &field.default {
                write!(f, " [default: {}]", default)?;
            }
            if !field.choices.is_empty() {
                write!(f, " {{{}}}", field.choices.join("|"))?;
            }
            if let Some(desc) = &field.description {
                write!(f, " - {}", desc)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A request to run one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool_id: String,
    pub input: String,
    #[serde(default)]
    pub options: ToolOptions,
}

impl ToolCall {
    pub fn new(tool_id: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            input: input.into(),
            options: ToolOptions::new(),
        }
    }

    /// Set options
    pub fn with_options(mut self, options: ToolOptions) -> Self {
        self.options = options;
        self
    }
}

/// Guarded outcome of running a tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub tool_id: String,
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(tool_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(tool_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            content: content.into(),
            is_error: true,
        }
    }

    /// Convert a process outcome, prefixing failures with the error glyph
    pub fn from_outcome(tool_id: impl Into<String>, outcome: Result<String>) -> Self {
        match outcome {
            Ok(content) => Self::success(tool_id, content),
            Err(e) => Self::error(tool_id, format!("{} {}", ERROR_GLYPH, e)),
        }
    }

    /// Text to hand to the copy sink; errors are never copied
    pub fn copy_text(&self) -> Option<&str> {
        if self.is_error { None } else { Some(&self.content) }
    }
}

/// Fail with `InvalidInput` when the trimmed input is empty
pub fn require_input<'a>(input: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(OktoolsError::InvalidInput(format!("please enter {}", what)));
    }
    Ok(trimmed)
}
