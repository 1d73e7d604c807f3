//! html-entities tool

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory};
use crate::tools::options::ToolOptions;

const NAMED_ENTITIES: [(char, &str); 32] = [
    ('<', "lt"),
    ('>', "gt"),
    ('&', "amp"),
    ('"', "quot"),
    ('\'', "apos"),
    ('©', "copy"),
    ('®', "reg"),
    ('™', "trade"),
    ('€', "euro"),
    ('£', "pound"),
    ('¥', "yen"),
    ('¢', "cent"),
    ('§', "sect"),
    ('¶', "para"),
    ('°', "deg"),
    ('±', "plusmn"),
    ('×', "times"),
    ('÷', "divide"),
    ('¬', "not"),
    ('√', "radic"),
    ('∞', "infin"),
    ('α', "alpha"),
    ('β', "beta"),
    ('γ', "gamma"),
    ('δ', "delta"),
    ('ε', "epsilon"),
    ('π', "pi"),
    ('θ', "theta"),
    ('σ', "sigma"),
    ('φ', "phi"),
    ('ψ', "psi"),
    ('ω', "omega"),
];

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(\d+);|&#[xX]([0-9a-fA-F]+);|&([a-zA-Z]+);?").expect("valid entity regex")
});

fn named_for(c: char) -> Option<&'static str> {
    NAMED_ENTITIES.iter().find(|(ch, _)| *ch == c).map(|(_, name)| *name)
}

fn char_for(name: &str) -> Option<char> {
    NAMED_ENTITIES.iter().find(|(_, n)| *n == name).map(|(c, _)| *c)
}

pub fn encode_entities(text: &str, encode_all: bool, use_named: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        let named = if use_named { named_for(c) } else { None };
        if let Some(name) = named {
            out.push_str(&format!("&{};", name));
        } else if encode_all || code < 32 || code > 126 {
            out.push_str(&format!("&#{};", code));
        } else if let Some(name) = named_for(c).filter(|_| "&<>\"'".contains(c)) {
            // Markup characters are always escaped
            out.push_str(&format!("&{};", name));
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode numeric and named references in one pass
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| char_for(name.as_str()))
            };
            decoded
                .map(|c| c.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub struct HtmlEntitiesTool;

impl Tool for HtmlEntitiesTool {
    fn id(&self) -> &'static str {
        "html-entities"
    }

    fn name(&self) -> &'static str {
        "HTML Entities"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Encode and decode HTML entities"
    }

    fn icon(&self) -> &'static str {
        "🔤"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["encode", "decode"], "default": "encode" },
                "encode_all": { "type": "boolean", "default": false, "description": "Encode every character numerically" },
                "use_named": { "type": "boolean", "default": true, "description": "Prefer named entities such as &copy;" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        if input.is_empty() {
            return Err(OktoolsError::InvalidInput("please enter text".to_string()));
        }
        match options.choice("mode", "encode", &["encode", "decode"])? {
            "decode" => Ok(decode_entities(input)),
            _ => Ok(encode_entities(
                input,
                options.bool_or("encode_all", false)?,
                options.bool_or("use_named", true)?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_named() {
        let out = encode_entities("<div class=\"x\">Hi & bye © 2024</div>", false, true);
        assert_eq!(
            out,
            "&lt;div class=&quot;x&quot;&gt;Hi &amp; bye &copy; 2024&lt;/div&gt;"
        );
    }

    #[test]
    fn test_encode_numeric_without_named() {
        assert_eq!(encode_entities("<é>", false, false), "&lt;&#233;&gt;");
    }

    #[test]
    fn test_encode_all() {
        assert_eq!(encode_entities("ab", true, true), "&#97;&#98;");
    }

    #[test]
    fn test_encode_astral_as_single_code_point() {
        assert_eq!(encode_entities("😀", false, true), "&#128512;");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_entities("&lt;p&gt; &#65;&#x42; &copy &unknown;"), "<p> AB © &unknown;");
        assert_eq!(decode_entities("&#x1F600;"), "😀");
    }

    #[test]
    fn test_decode_is_single_pass() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_round_trip() {
        let text = "Tom & \"Jerry\" <3 π ≈ 3.14";
        assert_eq!(decode_entities(&encode_entities(text, false, true)), text);
    }
}
