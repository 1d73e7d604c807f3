//! image-base64 tool - files to data URIs and back

use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A decoded `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file, guessing its MIME type from the extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        Ok(Self::new(mime, bytes))
    }

    /// Parse `data:<mime>;base64,<payload>`; a bare base64 payload is accepted too
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (mime, payload) = match text.strip_prefix("data:") {
            Some(rest) => {
                let (meta, payload) = rest.split_once(',').ok_or_else(|| {
                    OktoolsError::InvalidInput("data URI has no ',' separator".to_string())
                })?;
                let mime = meta.strip_suffix(";base64").ok_or_else(|| {
                    OktoolsError::InvalidInput("only base64 data URIs are supported".to_string())
                })?;
                let mime = if mime.is_empty() { FALLBACK_MIME } else { mime };
                (mime, payload)
            }
            None => (FALLBACK_MIME, text),
        };

        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|e| OktoolsError::InvalidInput(format!("invalid base64 payload: {}", e)))?;
        Ok(Self::new(mime, bytes))
    }

    pub fn to_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

pub struct ImageBase64Tool;

impl Tool for ImageBase64Tool {
    fn id(&self) -> &'static str {
        "image-base64"
    }

    fn name(&self) -> &'static str {
        "Image to Base64"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Image
    }

    fn description(&self) -> &'static str {
        "Convert images to Base64 and vice versa"
    }

    fn icon(&self) -> &'static str {
        "🖼️"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": {
                    "type": "string",
                    "enum": ["encode", "decode"],
                    "default": "encode",
                    "description": "encode: input is a file path; decode: input is a data URI"
                },
                "output": { "type": "string", "description": "File to write when decoding" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        match options.choice("mode", "encode", &["encode", "decode"])? {
            "decode" => {
                let output = options.require_str("output")?;
                let uri = DataUri::parse(require_input(input, "a data URI")?)?;
                fs::write(&output, &uri.bytes)?;
                log::info!("Wrote {} bytes to {}", uri.bytes.len(), output);
                Ok(format!(
                    "Type: {}\nSize: {} bytes\nSaved to: {}",
                    uri.mime,
                    uri.bytes.len(),
                    output
                ))
            }
            _ => {
                let path = require_input(input, "an image file path")?;
                let uri = DataUri::from_file(Path::new(path))?;
                log::debug!("Encoded {} ({} bytes, {})", path, uri.bytes.len(), uri.mime);
                Ok(uri.to_uri())
            }
        }
    }
}
