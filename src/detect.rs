//! Content-type detection for pasted or selected text

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10,13}$").expect("valid regex"));

const MIN_TIMESTAMP: u64 = 1_000_000_000;
const MAX_TIMESTAMP: u64 = 9_999_999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Url,
    Email,
    Timestamp,
    Text,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Json => "json",
            ContentType::Url => "url",
            ContentType::Email => "email",
            ContentType::Timestamp => "timestamp",
            ContentType::Text => "text",
        }
    }

    /// Tool that best handles this kind of content
    pub fn suggested_tool(&self) -> Option<&'static str> {
        suggested_tool(*self)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify `text`; the first matching rule wins
pub fn detect_content_type(text: &str) -> ContentType {
    let trimmed = text.trim();

    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
    {
        return ContentType::Json;
    }
    if URL_RE.is_match(trimmed) {
        return ContentType::Url;
    }
    if EMAIL_RE.is_match(trimmed) {
        return ContentType::Email;
    }
    if TIMESTAMP_RE.is_match(trimmed) {
        let in_range = trimmed
            .parse::<u64>()
            .map(|n| n > MIN_TIMESTAMP && n < MAX_TIMESTAMP)
            .unwrap_or(false);
        if in_range {
            return ContentType::Timestamp;
        }
    }
    ContentType::Text
}

pub fn suggested_tool(kind: ContentType) -> Option<&'static str> {
    match kind {
        ContentType::Json => Some("json-formatter"),
        ContentType::Url => Some("url-parser"),
        ContentType::Timestamp => Some("timestamp"),
        ContentType::Email | ContentType::Text => None,
    }
}
