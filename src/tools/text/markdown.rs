//! markdown-preview tool - a small Markdown to HTML renderer
//!
//! Block structure is recognised line by line, then inline markup is applied
//! to the text of each block. Code spans and fenced blocks are never
//! reinterpreted.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid regex"));
static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").expect("valid regex"));
static QUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^&gt;\s?(.*)$").expect("valid regex"));
static TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+\[([ xX])\]\s+(.*)$").expect("valid regex"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.+)$").expect("valid regex"));
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.+)$").expect("valid regex"));
static TABLE_SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*:?-+:?\s*$").expect("valid regex"));

/// Inline rules in application order
static INLINE_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"!\[([^\]]*)\]\(([^)\s]+)\)", r#"<img src="${2}" alt="${1}">"#),
        (r"\[([^\]]+)\]\(([^)\s]+)\)", r#"<a href="${2}" target="_blank">${1}</a>"#),
        (r"\*\*\*(.+?)\*\*\*", "<strong><em>${1}</em></strong>"),
        (r"(^|[^\w])___(.+?)___([^\w]|$)", "${1}<strong><em>${2}</em></strong>${3}"),
        (r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
        (r"(^|[^\w])__(.+?)__([^\w]|$)", "${1}<strong>${2}</strong>${3}"),
        (r"\*(.+?)\*", "<em>${1}</em>"),
        (r"(^|[^\w])_([^_]+?)_([^\w]|$)", "${1}<em>${2}</em>${3}"),
        (r"~~(.+?)~~", "<del>${1}</del>"),
    ]
    .into_iter()
    .map(|(pattern, with)| (Regex::new(pattern).expect("valid inline regex"), with))
    .collect()
});

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Apply inline markup to already-escaped text
fn render_inline(text: &str) -> String {
    let mut out = String::new();
    let segments: Vec<&str> = text.split('`').collect();
    for (i, segment) in segments.iter().enumerate() {
        let is_code = i % 2 == 1 && i + 1 < segments.len();
        if is_code {
            out.push_str(&format!("<code>{}</code>", segment));
        } else {
            if i % 2 == 1 {
                // unmatched backtick
                out.push('`');
            }
            let mut rendered = segment.to_string();
            for (re, with) in INLINE_RULES.iter() {
                rendered = re.replace_all(&rendered, *with).into_owned();
            }
            out.push_str(&rendered);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(&self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Open container blocks awaiting their closing line
#[derive(Default)]
struct Renderer {
    out: Vec<String>,
    paragraph: Vec<String>,
    quote: Vec<String>,
    list: Option<(ListKind, Vec<String>)>,
    table: Vec<String>,
}

fn table_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim().trim_start_matches('|');
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(str::trim).collect()
}

fn is_separator_row(line: &str) -> bool {
    table_cells(line).iter().all(|c| TABLE_SEPARATOR_CELL.is_match(c))
}

impl Renderer {
    fn flush(&mut self) {
        if !self.paragraph.is_empty() {
            let text = render_inline(&self.paragraph.join("\n"));
            self.out.push(format!("<p>{}</p>", text));
            self.paragraph.clear();
        }
        if !self.quote.is_empty() {
            let text = render_inline(&self.quote.join("<br>"));
            self.out.push(format!("<blockquote>{}</blockquote>", text));
            self.quote.clear();
        }
        if let Some((kind, items)) = self.list.take() {
            self.out.push(format!("<{}>{}</{}>", kind.tag(), items.join(""), kind.tag()));
        }
        if !self.table.is_empty() {
            let rows = std::mem::take(&mut self.table);
            self.out.push(render_table(&rows));
        }
    }

    fn push_item(&mut self, kind: ListKind, item: String) {
        match &mut self.list {
            Some((k, items)) if *k == kind => items.push(item),
            _ => {
                self.flush();
                self.list = Some((kind, vec![item]));
            }
        }
    }
}

fn render_table(rows: &[String]) -> String {
    let separator = rows.iter().position(|r| is_separator_row(r));
    let row_html = |row: &str, cell_tag: &str| {
        let cells: String = table_cells(row)
            .iter()
            .map(|c| format!("<{tag}>{}</{tag}>", render_inline(c), tag = cell_tag))
            .collect();
        format!("<tr>{}</tr>", cells)
    };

    let mut html = String::from("<table>");
    let body_start = match separator {
        Some(sep) if sep > 0 => {
            html.push_str("<thead>");
            for row in &rows[..sep] {
                html.push_str(&row_html(row.as_str(), "th"));
            }
            html.push_str("</thead>");
            sep + 1
        }
        Some(sep) => sep + 1,
        None => 0,
    };
    html.push_str("<tbody>");
    for row in rows[body_start..].iter().filter(|r| !is_separator_row(r)) {
        html.push_str(&row_html(row.as_str(), "td"));
    }
    html.push_str("</tbody></table>");
    html
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut r = Renderer::default();
    let mut lines = markdown.lines();

    while let Some(raw) = lines.next() {
        let trimmed = raw.trim();

        if let Some(lang) = trimmed.strip_prefix("```") {
            r.flush();
            let mut code = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim_start().starts_with("```") {
                    break;
                }
                code.push(escape_html(inner));
            }
            r.out.push(format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                lang.trim(),
                code.join("\n")
            ));
            continue;
        }

        if trimmed.is_empty() {
            r.flush();
            continue;
        }

        let line = escape_html(raw);
        let trimmed = line.trim();

        if trimmed.starts_with('|') {
            if r.table.is_empty() {
                r.flush();
            }
            r.table.push(trimmed.to_string());
            continue;
        } else if !r.table.is_empty() {
            r.flush();
        }

        if let Some(caps) = HEADING.captures(trimmed) {
            r.flush();
            let level = caps[1].len();
            r.out.push(format!("<h{}>{}</h{}>", level, render_inline(caps[2].trim()), level));
        } else if RULE.is_match(trimmed) {
            r.flush();
            r.out.push("<hr>".to_string());
        } else if let Some(caps) = QUOTE.captures(trimmed) {
            if r.quote.is_empty() {
                r.flush();
            }
            r.quote.push(caps[1].to_string());
        } else if let Some(caps) = TASK.captures(&line) {
            let checked = if caps[1].trim().is_empty() { "" } else { " checked" };
            let item = format!(
                "<li><input type=\"checkbox\"{} disabled> {}</li>",
                checked,
                render_inline(&caps[2])
            );
            r.push_item(ListKind::Unordered, item);
        } else if let Some(caps) = BULLET.captures(&line) {
            let item = format!("<li>{}</li>", render_inline(&caps[1]));
            r.push_item(ListKind::Unordered, item);
        } else if let Some(caps) = NUMBERED.captures(&line) {
            let item = format!("<li>{}</li>", render_inline(&caps[1]));
            r.push_item(ListKind::Ordered, item);
        } else {
            if r.list.is_some() || !r.quote.is_empty() {
                r.flush();
            }
            r.paragraph.push(trimmed.to_string());
        }
    }
    r.flush();
    r.out.join("\n")
}

pub struct MarkdownPreviewTool;

impl Tool for MarkdownPreviewTool {
    fn id(&self) -> &'static str {
        "markdown-preview"
    }

    fn name(&self) -> &'static str {
        "Markdown Preview"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Text
    }

    fn description(&self) -> &'static str {
        "Preview Markdown with live rendering"
    }

    fn icon(&self) -> &'static str {
        "📝"
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        require_input(input, "Markdown text")?;
        Ok(markdown_to_html(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let html = markdown_to_html("# Title\n\nSome *text* here.\nSecond line.\n\n###### Small");
        assert_eq!(
            html,
            "<h1>Title</h1>\n<p>Some <em>text</em> here.\nSecond line.</p>\n<h6>Small</h6>"
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(markdown_to_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_emphasis_variants() {
        let html = render_inline("***both*** **bold** __strong__ _it_ ~~gone~~");
        assert_eq!(
            html,
            "<strong><em>both</em></strong> <strong>bold</strong> <strong>strong</strong> <em>it</em> <del>gone</del>"
        );
    }

    #[test]
    fn test_snake_case_is_not_emphasis() {
        assert_eq!(render_inline("call some_var_name now"), "call some_var_name now");
    }

    #[test]
    fn test_inline_code_is_literal() {
        assert_eq!(render_inline("use `**x**` here"), "use <code>**x**</code> here");
    }

    #[test]
    fn test_fenced_code() {
        let html = markdown_to_html("```js\nif (a < b) { *x* }\n```");
        assert_eq!(html, "<pre><code class=\"language-js\">if (a &lt; b) { *x* }</code></pre>");
    }

    #[test]
    fn test_lists_are_grouped() {
        let html = markdown_to_html("- one\n- two\n1. first\n2. second");
        assert_eq!(
            html,
            "<ul><li>one</li><li>two</li></ul>\n<ol><li>first</li><li>second</li></ol>"
        );
    }

    #[test]
    fn test_task_items() {
        let html = markdown_to_html("- [x] done\n- [ ] todo");
        assert_eq!(
            html,
            "<ul><li><input type=\"checkbox\" checked disabled> done</li><li><input type=\"checkbox\" disabled> todo</li></ul>"
        );
    }

    #[test]
    fn test_blockquote_and_rule() {
        let html = markdown_to_html("> quoted\n> more\n\n---");
        assert_eq!(html, "<blockquote>quoted<br>more</blockquote>\n<hr>");
    }

    #[test]
    fn test_links_and_images() {
        let html = render_inline("[site](https://a.io/x_y_z) ![logo](l.png)");
        assert_eq!(
            html,
            "<a href=\"https://a.io/x_y_z\" target=\"_blank\">site</a> <img src=\"l.png\" alt=\"logo\">"
        );
    }

    #[test]
    fn test_table_header_inferred_from_separator() {
        let html = markdown_to_html("| Name | Age |\n|------|-----|\n| John | 30 |");
        assert_eq!(
            html,
            "<table><thead><tr><th>Name</th><th>Age</th></tr></thead><tbody><tr><td>John</td><td>30</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_block_elements_not_wrapped_in_paragraphs() {
        let html = markdown_to_html("# H\n- item\n> q");
        assert!(!html.contains("<p>"));
    }
}
