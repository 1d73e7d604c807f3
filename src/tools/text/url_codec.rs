//! url-encode tool - percent-encoding with `encodeURIComponent` semantics

use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

/// Characters left alone by `encodeURIComponent` that `urlencoding` escapes
const COMPONENT_SAFE: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub fn encode_component(text: &str) -> String {
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escaped, raw) in COMPONENT_SAFE {
        encoded = encoded.replace(escaped, raw);
    }
    encoded
}

/// Strict inverse of `encode_component`; malformed escapes are rejected
pub fn decode_component(text: &str) -> Result<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(OktoolsError::InvalidInput(format!(
                    "malformed percent escape at byte {}",
                    i
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| OktoolsError::InvalidInput(format!("decoded bytes are not UTF-8: {}", e)))
}

pub struct UrlTool;

impl Tool for UrlTool {
    fn id(&self) -> &'static str {
        "url-encode"
    }

    fn name(&self) -> &'static str {
        "URL Encode/Decode"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Encode and decode URL components"
    }

    fn icon(&self) -> &'static str {
        "🔗"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["encode", "decode"], "default": "encode" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        match options.choice("mode", "encode", &["encode", "decode"])? {
            "decode" => decode_component(input),
            _ => Ok(encode_component(input)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_component_rules() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("/?#"), "%2F%3F%23");
        assert_eq!(encode_component("你好"), "%E4%BD%A0%E5%A5%BD");
    }

    #[test]
    fn test_percent_sign_is_not_restored() {
        assert_eq!(encode_component("%21"), "%2521");
        assert_eq!(decode_component("%2521").unwrap(), "%21");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode_component("100%").is_err());
        assert!(decode_component("%zz").is_err());
        assert!(decode_component("%FF").is_err());
    }

    #[test]
    fn test_inverse_over_printable_ascii_and_unicode() {
        let printable: String = (0x20u8..0x7f).map(char::from).collect();
        for sample in [printable.as_str(), "héllo wörld", "emoji 🎉 + 漢字"] {
            assert_eq!(decode_component(&encode_component(sample)).unwrap(), sample);
        }
    }

    #[test]
    fn test_decode_keeps_plus() {
        let opts = ToolOptions::new().with("mode", "decode");
        assert_eq!(UrlTool.process("a+b%20c", &opts).unwrap(), "a+b c");
    }
}
