//! mime-lookup tool - file extension to MIME type

use crate::error::{OktoolsError, Result};
use crate::tools::definition::{Tool, ToolCategory, require_input};
use crate::tools::options::ToolOptions;

/// Curated table; consulted before the system guesser
const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("rar", "application/x-rar-compressed"),
    ("tar", "application/x-tar"),
    ("gz", "application/gzip"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("webm", "video/webm"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("exe", "application/x-msdownload"),
    ("dll", "application/x-msdownload"),
    ("iso", "application/x-iso9660-image"),
    ("dmg", "application/x-apple-diskimage"),
    ("apk", "application/vnd.android.package-archive"),
    ("ipa", "application/octet-stream"),
    ("deb", "application/vnd.debian.binary-package"),
    ("rpm", "application/x-rpm"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("eot", "application/vnd.ms-fontobject"),
    ("csv", "text/csv"),
    ("rtf", "application/rtf"),
    ("md", "text/markdown"),
    ("yaml", "application/x-yaml"),
    ("yml", "application/x-yaml"),
    ("toml", "application/toml"),
    ("ini", "text/plain"),
    ("conf", "text/plain"),
    ("log", "text/plain"),
    ("sql", "application/sql"),
    ("sh", "application/x-sh"),
    ("bash", "application/x-sh"),
    ("php", "application/x-httpd-php"),
    ("py", "text/x-python"),
    ("rb", "text/x-ruby"),
    ("java", "text/x-java-source"),
    ("class", "application/java-vm"),
    ("jar", "application/java-archive"),
    ("war", "application/java-archive"),
    ("c", "text/x-c"),
    ("h", "text/x-c"),
    ("cpp", "text/x-c++"),
    ("hpp", "text/x-c++"),
    ("cs", "text/x-csharp"),
    ("swift", "text/x-swift"),
    ("kt", "text/x-kotlin"),
    ("go", "text/x-go"),
    ("rs", "text/x-rust"),
    ("ts", "application/typescript"),
    ("tsx", "application/typescript"),
    ("jsx", "text/jsx"),
    ("vue", "text/x-vue"),
    ("wasm", "application/wasm"),
    ("graphql", "application/graphql"),
    ("graphqls", "application/graphql"),
    ("gql", "application/graphql"),
    ("proto", "application/x-protobuf"),
    ("thrift", "application/x-thrift"),
    ("avro", "application/avro"),
];

/// Where a lookup was answered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeSource {
    Table,
    System,
}

/// Look up an extension, with or without its leading dot
pub fn lookup(extension: &str) -> Option<(String, MimeSource)> {
    let ext = extension.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        return None;
    }
    if let Some((_, mime)) = MIME_TYPES.iter().find(|(e, _)| *e == ext) {
        return Some((mime.to_string(), MimeSource::Table));
    }
    mime_guess::from_ext(&ext)
        .first()
        .map(|m| (m.essence_str().to_string(), MimeSource::System))
}

pub struct MimeLookupTool;

impl Tool for MimeLookupTool {
    fn id(&self) -> &'static str {
        "mime-lookup"
    }

    fn name(&self) -> &'static str {
        "MIME Type Lookup"
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Utilities
    }

    fn description(&self) -> &'static str {
        "Lookup MIME types for file extensions"
    }

    fn icon(&self) -> &'static str {
        "📁"
    }

    fn process(&self, input: &str, _options: &ToolOptions) -> Result<String> {
        let ext = require_input(input, "a file extension")?;
        let normalized = ext.trim_start_matches('.').to_lowercase();
        match lookup(ext) {
            Some((mime, source)) => {
                let source = match source {
                    MimeSource::Table => "built-in table",
                    MimeSource::System => "system registry",
                };
                Ok(format!(".{}: {}\nSource: {}", normalized, mime, source))
            }
            None => Err(OktoolsError::InvalidInput(format!(
                "unknown extension '.{}'; application/octet-stream is the generic fallback",
                normalized
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup_is_case_insensitive() {
        assert_eq!(lookup(".PDF"), Some(("application/pdf".to_string(), MimeSource::Table)));
        assert_eq!(lookup("yml").unwrap().0, "application/x-yaml");
    }

    #[test]
    fn test_system_fallback() {
        let (mime, source) = lookup("epub").unwrap();
        assert_eq!(mime, "application/epub+zip");
        assert_eq!(source, MimeSource::System);
    }

    #[test]
    fn test_unknown_extension() {
        let err = MimeLookupTool.process("zzqx", &ToolOptions::new()).unwrap_err();
        assert!(err.to_string().contains("application/octet-stream"));
        assert!(lookup(".").is_none());
    }

    #[test]
    fn test_output() {
        let out = MimeLookupTool.process(" .Png ", &ToolOptions::new()).unwrap();
        assert_eq!(out, ".png: image/png\nSource: built-in table");
    }
}
