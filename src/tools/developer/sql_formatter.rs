//! sql-formatter tool
//!
//! A keyword-driven layout pass rather than a SQL parser: clause keywords
//! start new lines, parentheses open an indented block, and commas can lead.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::Result;
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "ORDER BY", "GROUP BY", "HAVING", "INSERT", "INTO", "VALUES",
    "UPDATE", "SET", "DELETE", "JOIN", "LEFT JOIN", "RIGHT JOIN", "INNER JOIN", "OUTER JOIN",
    "ON", "AND", "OR", "NOT", "IN", "LIKE", "BETWEEN", "UNION", "UNION ALL", "INTERSECT",
    "EXCEPT", "CREATE", "TABLE", "DROP", "ALTER", "ADD", "COLUMN", "PRIMARY KEY",
    "FOREIGN KEY", "REFERENCES", "CONSTRAINT", "DISTINCT", "AS", "ASC", "DESC", "LIMIT",
    "OFFSET", "CASE", "WHEN", "THEN", "ELSE", "END", "EXISTS", "COUNT", "SUM", "AVG", "MIN",
    "MAX", "GROUP_CONCAT",
];

/// Keywords that begin a new line, longest alternatives first
const CLAUSE_KEYWORDS: &[&str] = &[
    "LEFT JOIN", "RIGHT JOIN", "INNER JOIN", "OUTER JOIN", "UNION ALL", "ORDER BY", "GROUP BY",
    "SELECT", "FROM", "WHERE", "HAVING", "INSERT", "VALUES", "UPDATE", "SET", "DELETE", "JOIN",
    "ON", "AND", "OR", "UNION", "INTERSECT", "EXCEPT", "LIMIT", "OFFSET",
];

fn keyword_pattern(keyword: &str) -> String {
    keyword.replace(' ', r"\s+")
}

static UPPERCASE_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    KEYWORDS
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", keyword_pattern(kw)))
                .expect("valid keyword regex");
            (*kw, re)
        })
        .collect()
});

static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = CLAUSE_KEYWORDS.iter().map(|kw| keyword_pattern(kw)).collect();
    Regex::new(&format!(r"(?i)\s+({})\b", alternatives.join("|"))).expect("valid clause regex")
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*").expect("valid regex"));
static OPEN_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(\s*").expect("valid regex"));
static CLOSE_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\)").expect("valid regex"));
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

static COMPRESS_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\s*,\s*", ","),
        (r"\s*=\s*", "="),
        (r"\s*\(\s*", "("),
        (r"\s*\)\s*", ")"),
        (r"\s*;\s*", ";"),
    ]
    .into_iter()
    .map(|(pattern, with)| (Regex::new(pattern).expect("valid compress regex"), with))
    .collect()
});

/// Layout flags for `format_sql`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlStyle {
    pub uppercase: bool,
    pub leading_commas: bool,
}

impl Default for SqlStyle {
    fn default() -> Self {
        Self {
            uppercase: true,
            leading_commas: true,
        }
    }
}

pub fn format_sql(sql: &str, style: SqlStyle) -> String {
    let mut formatted = WHITESPACE_RE.replace_all(sql.trim(), " ").into_owned();

    if style.uppercase {
        for (keyword, re) in UPPERCASE_RES.iter() {
            formatted = re.replace_all(&formatted, *keyword).into_owned();
        }
    }

    formatted = CLAUSE_RE.replace_all(&formatted, "\n  ${1}").into_owned();

    let comma = if style.leading_commas { "\n  , " } else { ",\n  " };
    formatted = COMMA_RE.replace_all(&formatted, comma).into_owned();

    formatted = OPEN_PAREN_RE.replace_all(&formatted, "(\n    ").into_owned();
    formatted = CLOSE_PAREN_RE.replace_all(&formatted, "\n  )").into_owned();
    formatted = BLANK_LINES_RE.replace_all(&formatted, "\n").into_owned();

    let mut indent: usize = 0;
    let mut lines = Vec::new();
    for line in formatted.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(')') {
            indent = indent.saturating_sub(1);
        }
        lines.push(format!("{}{}", "  ".repeat(indent), trimmed));
        if trimmed.ends_with('(') {
            indent += 1;
        }
    }
    lines.join("\n")
}

/// Single-line form with spacing removed around punctuation
pub fn compress_sql(sql: &str) -> String {
    let mut compressed = WHITESPACE_RE.replace_all(sql, " ").into_owned();
    for (re, with) in COMPRESS_RES.iter() {
        compressed = re.replace_all(&compressed, *with).into_owned();
    }
    compressed.trim().to_string()
}

pub struct SqlFormatterTool;

impl Tool for SqlFormatterTool {
    fn id(&self) -> &'static str {
        "sql-formatter"
    }

    fn name(&self) -> &'static str {
        "SQL Formatter"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Developer
    }

    fn description(&self) -> &'static str {
        "Format and beautify SQL queries"
    }

    fn icon(&self) -> &'static str {
        "🗃️"
    }

    fn options_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string", "enum": ["format", "compress"], "default": "format" },
                "uppercase": { "type": "boolean", "default": true, "description": "Uppercase SQL keywords" },
                "leading_commas": { "type": "boolean", "default": true, "description": "Start lines with the comma" }
            }
        })
    }

    fn process(&self, input: &str, options: &ToolOptions) -> Result<String> {
        let sql = require_input(input, "a SQL query")?;
        match options.choice("mode", "format", &["format", "compress"])? {
            "compress" => Ok(compress_sql(sql)),
            _ => {
                let style = SqlStyle {
                    uppercase: options.bool_or("uppercase", true)?,
                    leading_commas: options.bool_or("leading_commas", true)?,
                };
                Ok(format_sql(sql, style))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_select() {
        let out = format_sql("select id, name from users where id = 1 and active = true", SqlStyle::default());
        assert_eq!(
            out,
            "SELECT id\n, name\nFROM users\nWHERE id = 1\nAND active = true"
        );
    }

    #[test]
    fn test_trailing_commas() {
        let style = SqlStyle { uppercase: true, leading_commas: false };
        let out = format_sql("SELECT a, b FROM t", style);
        assert_eq!(out, "SELECT a,\nb\nFROM t");
    }

    #[test]
    fn test_keeps_case_when_not_uppercasing() {
        let style = SqlStyle { uppercase: false, leading_commas: true };
        let out = format_sql("select a from t where x = 1", style);
        assert_eq!(out, "select a\nfrom t\nwhere x = 1");
    }

    #[test]
    fn test_multiword_join_stays_together() {
        let out = format_sql("select * from a left join b on a.id = b.id", SqlStyle::default());
        assert!(out.contains("\nLEFT JOIN b\nON a.id = b.id"));
    }

    #[test]
    fn test_parentheses_indent() {
        let out = format_sql("SELECT * FROM t WHERE id IN (SELECT id FROM u)", SqlStyle::default());
        let lines: Vec<&str> = out.lines().collect();
        let open = lines.iter().position(|l| l.ends_with('(')).unwrap();
        assert!(lines[open + 1].starts_with("  "));
        assert_eq!(lines.last().unwrap().trim(), ")");
    }

    #[test]
    fn test_keyword_inside_identifier_untouched() {
        let out = format_sql("select ordered from t", SqlStyle::default());
        assert!(out.starts_with("SELECT ordered"));
    }

    #[test]
    fn test_compress() {
        let out = compress_sql("SELECT  a ,  b\nFROM t WHERE ( x = 1 ) ;");
        assert_eq!(out, "SELECT a,b FROM t WHERE(x=1);");
    }

    #[test]
    fn test_process_modes() {
        let opts = ToolOptions::new().with("mode", "compress");
        assert_eq!(SqlFormatterTool.process("a , b", &opts).unwrap(), "a,b");
        assert!(SqlFormatterTool.process(" ", &ToolOptions::new()).is_err());
    }
}
