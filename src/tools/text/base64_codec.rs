//! base64 tool - UTF-8 aware encoding and decoding

use base64::Engine;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

/// URL-safe alphabet, unpadded on encode and padding-agnostic on decode
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode(text: &str, url_safe: bool) -> String {
    if url_safe {
        URL_SAFE.encode(text.as_bytes())
    } else {
        STANDARD.encode(text.as_bytes())
    }
}

pub fn decode(encoded: &str, url_safe: bool) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = if url_safe {
        URL_SAFE.decode(&compact)
    } else {
        STANDARD_LENIENT.decode(&compact)
    }
    .map_err(|e| OktoolsError::InvalidInput(format!("not valid base64: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|_| OktoolsError::InvalidInput("decoded bytes are not UTF-8 text".to_string()))
}

pub struct Base64Tool;

impl Tool for Base64Tool {
    fn id(&self) -> &'static str {
        "base64"
    }

    fn name(&self) -> &'static str {
        "Base64 Encode/Decode"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Encode and decode Base64 strings"
    }

    fn icon(&self) -> &'static str {
        "🔠"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["encode", "decode"], "default": "encode" },
                "url_safe": { "type": "boolean", "default": false, "description": "Use the URL-safe alphabet without padding" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let url_safe = options.bool_or("url_safe", false)?;
        match options.choice("mode", "encode", &["encode", "decode"])? {
            "decode" => decode(require_input(input, "Base64 text")?, url_safe),
            _ => {
                if input.is_empty() {
                    return Err(OktoolsError::InvalidInput("please enter text to encode".to_string()));
                }
                Ok(encode(input, url_safe))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii_and_utf8() {
        assert_eq!(encode("hello", false), "aGVsbG8=");
        assert_eq!(encode("你好", false), "5L2g5aW9");
    }

    #[test]
    fn test_decode_round_trip() {
        for text in ["hello world", "ünïcödé ✓", "a"] {
            assert_eq!(decode(&encode(text, false), false).unwrap(), text);
            assert_eq!(decode(&encode(text, true), true).unwrap(), text);
        }
    }

    #[test]
    fn test_url_safe_alphabet() {
        // U+FFFF encodes to "77+/" in the standard alphabet
        let text = String::from_utf8_lossy(&[0xef, 0xbf, 0xbf]).into_owned();
        let standard = encode(&text, false);
        let safe = encode(&text, true);
        assert!(!safe.contains('=') && !safe.contains('+') && !safe.contains('/'));
        assert_eq!(standard.trim_end_matches('='), safe.replace('-', "+").replace('_', "/"));
    }

    #[test]
    fn test_decode_ignores_whitespace_and_missing_padding() {
        assert_eq!(decode("aGVs\nbG8", false).unwrap(), "hello");
    }

    #[test]
    fn test_decode_errors() {
        assert!(decode("***", false).is_err());
        // valid base64 of invalid UTF-8
        assert!(decode("/w==", false).is_err());
    }

    #[test]
    fn test_process_modes() {
        let opts = ToolOptions::new().with("mode", "decode");
        assert_eq!(Base64Tool.process("aGVsbG8=", &opts).unwrap(), "hello");
        assert_eq!(Base64Tool.process("hello", &ToolOptions::new()).unwrap(), "aGVsbG8=");
        assert!(Base64Tool.process("", &ToolOptions::new()).is_err());
    }
}
