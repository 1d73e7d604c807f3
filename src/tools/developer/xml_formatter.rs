//! xml-formatter tool - indentation and compression for XML documents

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

static SPACE_BEFORE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+<").expect("valid regex"));
static SPACE_AFTER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+").expect("valid regex"));
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static PROCESSING_INSTRUCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\?[^>]*\?>").expect("valid regex"));

fn strip_layout(xml: &str) -> String {
    let xml = SPACE_BEFORE_TAG.replace_all(xml, "<");
    SPACE_AFTER_TAG.replace_all(&xml, ">").into_owned()
}

fn tag_name(tag: &str) -> &str {
    tag.split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or("")
}

/// Find the end of the markup starting at `start`, returning the index after it
fn markup_end(xml: &str, start: usize) -> Result<usize> {
    let rest = &xml[start..];
    let (terminator, skip) = if rest.starts_with("<!--") {
        ("-->", 4)
    } else if rest.starts_with("<![CDATA[") {
        ("]]>", 9)
    } else {
        (">", 1)
    };
    rest[skip..]
        .find(terminator)
        .map(|pos| start + skip + pos + terminator.len())
        .ok_or_else(|| {
            let preview: String = rest.chars().take(20).collect();
            OktoolsError::Parse(format!("unclosed tag starting at '{}'", preview))
        })
}

/// Re-indent `xml` with `indent` per nesting level
pub fn format_xml(xml: &str, indent: &str) -> Result<String> {
    let xml = strip_layout(xml);
    let mut out: Vec<String> = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut i = 0;

    while i < xml.len() {
        if xml[i..].starts_with('<') {
            let end = markup_end(&xml, i)?;
            let markup = &xml[i..end];
            let inner = &markup[1..markup.len() - 1];

            if let Some(closing) = inner.strip_prefix('/') {
                let name = tag_name(closing.trim());
                match open.pop() {
                    Some(expected) if expected == name => {}
                    Some(expected) => {
                        return Err(OktoolsError::Parse(format!(
                            "expected </{}> but found </{}>",
                            expected, name
                        )));
                    }
                    None => {
                        return Err(OktoolsError::Parse(format!("unexpected </{}>", name)));
                    }
                }
                out.push(format!("{}{}", indent.repeat(open.len()), markup));
            } else if inner.starts_with('?') || inner.starts_with('!') {
                // Declarations, comments and CDATA are not indented
                out.push(markup.to_string());
            } else if inner.ends_with('/') {
                out.push(format!("{}{}", indent.repeat(open.len()), markup));
            } else {
                out.push(format!("{}{}", indent.repeat(open.len()), markup));
                open.push(tag_name(inner).to_string());
            }
            i = end;
        } else {
            let next = xml[i..].find('<').map(|p| i + p).unwrap_or(xml.len());
            let text = xml[i..next].trim();
            if !text.is_empty() {
                out.push(format!("{}{}", indent.repeat(open.len()), text));
            }
            i = next;
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(OktoolsError::Parse(format!("unclosed tag <{}>", unclosed)));
    }
    Ok(out.join("\n"))
}

/// Strip inter-tag whitespace, comments and processing instructions
pub fn compress_xml(xml: &str) -> String {
    let xml = strip_layout(xml);
    let xml = COMMENT.replace_all(&xml, "");
    PROCESSING_INSTRUCTION.replace_all(&xml, "").trim().to_string()
}

pub struct XmlFormatterTool;

impl Tool for XmlFormatterTool {
    fn id(&self) -> &'static str {
        "xml-formatter"
    }

    fn name(&self) -> &'static str {
        "XML Formatter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Format and validate XML documents"
    }

    fn icon(&self) -> &'static str {
        "📄"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "indent": { "type": "string", "enum": ["2", "4", "8", "tab"], "default": "2" },
                "compress": { "type": "boolean", "default": false }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let xml = require_input(input, "an XML document")?;
        if options.bool_or("compress", false)? {
            return Ok(compress_xml(xml));
        }
        let indent = match options.choice("indent", "2", &["2", "4", "8", "tab"])? {
            "tab" => "\t".to_string(),
            n => " ".repeat(n.parse().unwrap_or(2)),
        };
        format_xml(xml, &indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_nested() {
        let out = format_xml("<root><person><name>John</name><age>30</age></person></root>", "  ").unwrap();
        let expected = "<root>\n  <person>\n    <name>\n      John\n    </name>\n    <age>\n      30\n    </age>\n  </person>\n</root>";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_declaration_and_comment_unindented() {
        let out = format_xml("<?xml version=\"1.0\"?><a><!-- note --><b/></a>", "    ").unwrap();
        assert_eq!(out, "<?xml version=\"1.0\"?>\n<a>\n<!-- note -->\n    <b/>\n</a>");
    }

    #[test]
    fn test_attributes_and_self_closing() {
        let out = format_xml("<a x=\"1\"><img src=\"p.png\" /></a>", "  ").unwrap();
        assert_eq!(out, "<a x=\"1\">\n  <img src=\"p.png\" />\n</a>");
    }

    #[test]
    fn test_unclosed_tag() {
        assert!(matches!(format_xml("<a><b></b>", "  "), Err(OktoolsError::Parse(_))));
        assert!(matches!(format_xml("<a", "  "), Err(OktoolsError::Parse(_))));
    }

    #[test]
    fn test_mismatched_close() {
        let err = format_xml("<a><b></a></b>", "  ").unwrap_err();
        assert!(err.to_string().contains("expected </b>"));
    }

    #[test]
    fn test_compress() {
        let xml = "<?xml version=\"1.0\"?>\n<a>\n  <!-- c -->\n  <b>1</b>\n</a>";
        assert_eq!(compress_xml(xml), "<a><b>1</b></a>");
    }

    #[test]
    fn test_tab_indent_option() {
        let opts = ToolOptions::new().with("indent", "tab");
        let out = XmlFormatterTool.process("<a><b/></a>", &opts).unwrap();
        assert_eq!(out, "<a>\n\t<b/>\n</a>");
    }
}
