//! url-parser tool - URL components and decoded query parameters

use url::Url;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

/// Render the components the way a browser's `URL` object exposes them
pub fn describe_url(url: &Url) -> String {
    let hostname = url.host_str().unwrap_or("");
    let host = match url.port() {
        Some(port) => format!("{}:{}", hostname, port),
        None => hostname.to_string(),
    };
    let non_empty = |part: Option<&str>, prefix: char| match part {
        Some(p) if !p.is_empty() => format!("{}{}", prefix, p),
        _ => "(none)".to_string(),
    };

    let mut lines = vec![
        format!("Protocol: {}:", url.scheme()),
        format!("Host: {}", host),
        format!("Hostname: {}", hostname),
        format!(
            "Port: {}",
            url.port().map(|p| p.to_string()).unwrap_or_else(|| "(default)".to_string())
        ),
        format!("Path: {}", url.path()),
        format!("Query: {}", non_empty(url.query(), '?')),
        format!("Hash: {}", non_empty(url.fragment(), '#')),
    ];

    let params: Vec<String> = url
        .query_pairs()
        .map(|(key, value)| format!("  {} = {}", key, value))
        .collect();
    if !params.is_empty() {
        lines.push(String::new());
        lines.push("Query parameters:".to_string());
        lines.extend(params);
    }
    lines.join("\n")
}

pub struct UrlParserTool;

impl Tool for UrlParserTool {
    fn id(&self) -> &'static str {
        "url-parser"
    }

    fn name(&self) -> &'static str {
        "URL Parser"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Utilities
    }

    fn description(&self) -> &'static str {
        "Parse and analyze URLs"
    }

    fn icon(&self) -> &'static str {
        "🔗"
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        let text = require_input(input, "a URL")?;
        let url = Url::parse(text)
            .map_err(|e| OktoolsError::Parse(format!("invalid URL: {}", e)))?;
        Ok(describe_url(&url))
    }
}
