//! Side panel integration tests
//!
//! Drives the full flow over a real preferences file: registry lookup,
//! message relay, tool execution and persisted preferences.

use std::collections::HashMap;

use oktools::detect::detect_content_type;
use oktools::error::Result;
use oktools::host::{HostMessage, Workbench, open_from_context_menu, relay};
use oktools::storage::{JsonFileStore, PREFERENCES_FILE, PreferenceStore, Theme};
use oktools::tools::{LocalToolRouter, ToolCatalog, ToolOptions};
use tempfile::TempDir;

fn router() -> LocalToolRouter {
    LocalToolRouter::new(ToolCatalog::with_builtins())
}

/// Last used tool survives a restart
#[test]
fn test_last_used_tool_persists() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);
        assert!(bench.current().is_none());
        bench.select("hash-calculator")?;
    }

    {
        let bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);
        assert_eq!(bench.current().map(|t| t.id()), Some("hash-calculator"));
    }

    let raw = std::fs::read_to_string(temp_dir.path().join(PREFERENCES_FILE))?;
    assert!(raw.contains("\"lastUsedTool\": \"hash-calculator\""));
    Ok(())
}

/// Context menu click, relay, then side panel handling
#[test]
fn test_context_menu_flow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);

    let open = open_from_context_menu("oktools-base64", "hello")?;
    let load = relay(&open).expect("OPEN_TOOL is relayed");
    assert!(matches!(load, HostMessage::LoadTool { .. }));
    assert!(relay(&load).is_none());

    let result = bench.handle(&load)?.expect("input was supplied");
    assert!(!result.is_error);
    assert_eq!(result.content, "aGVsbG8=");
    assert_eq!(bench.store().last_used_tool()?.as_deref(), Some("base64"));
    Ok(())
}

/// Wire-format messages round through parse and relay
#[test]
fn test_message_json_flow() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);

    let open = HostMessage::parse(r#"{"type":"OPEN_TOOL","toolId":"json-formatter","input":"{\"a\":1}"}"#)?;
    let load = relay(&open).expect("OPEN_TOOL is relayed");
    assert_eq!(
        load.to_json()?,
        r#"{"type":"LOAD_TOOL","toolId":"json-formatter","input":"{\"a\":1}"}"#
    );

    let result = bench.handle(&load)?.expect("input was supplied");
    assert_eq!(result.content, "{\n  \"a\": 1\n}");
    Ok(())
}

/// Unknown tool ids are rejected without touching preferences
#[test]
fn test_unknown_tool_message() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);

    let err = bench.handle(&HostMessage::load("qrcode", None)).unwrap_err();
    assert!(err.to_string().contains("qrcode"));
    assert!(bench.store().last_used_tool()?.is_none());
    Ok(())
}

/// Configured defaults sit under explicit options
#[test]
fn test_router_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut defaults = HashMap::new();
    defaults.insert("json-formatter".to_string(), ToolOptions::new().with("mode", "minify"));
    let mut bench = Workbench::open(
        router().with_defaults(defaults),
        JsonFileStore::open(temp_dir.path())?,
    );

    let minified = bench.open_tool("json-formatter", r#"{ "a": [1, 2] }"#, ToolOptions::new())?;
    assert_eq!(minified.content, r#"{"a":[1,2]}"#);

    let formatted = bench.run(
        r#"{ "a": 1 }"#,
        ToolOptions::new().with("mode", "format").with("indent", 4),
    )?;
    assert_eq!(formatted.content, "{\n    \"a\": 1\n}");
    Ok(())
}

/// Tool failures come back as guarded results
#[test]
fn test_failure_is_guarded() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);

    let result = bench.open_tool("aes-encrypt", "secret text", ToolOptions::new())?;
    assert!(result.is_error);
    assert!(result.content.starts_with("❌ "));
    assert!(result.copy_text().is_none());
    Ok(())
}

/// AES output decrypts with the same key through the registry
#[test]
fn test_aes_through_registry() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);

    let key = ToolOptions::new().with("key", "hunter2");
    let sealed = bench.open_tool("aes-encrypt", "attack at dawn", key.clone())?;
    assert!(sealed.content.starts_with("U2FsdGVkX1"));

    let opened = bench.run(&sealed.content, key.with("mode", "decrypt"))?;
    assert_eq!(opened.content, "attack at dawn");
    Ok(())
}

/// Searches and theme are stored alongside the last used tool
#[test]
fn test_preferences_roundtrip() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);
        assert_eq!(bench.search("JSON")?.len(), 4);
        bench.search("base")?;
        bench.toggle_theme()?;
    }

    let bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);
    assert_eq!(bench.recent_searches()?, vec!["base", "JSON"]);
    assert_eq!(bench.theme()?, Theme::Dark);
    Ok(())
}

/// Detection feeds the suggested tool straight into the registry
#[test]
fn test_detect_then_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);

    let text = "https://example.com:8080/a?b=1";
    let tool_id = detect_content_type(text).suggested_tool().expect("urls have a tool");
    let result = bench.open_tool(tool_id, text, ToolOptions::new())?;
    assert!(result.content.contains("Port: 8080"));
    Ok(())
}

/// Far-future millisecond timestamps convert without the RFC 2822 line
#[test]
fn test_far_future_timestamp_through_router() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);

    let result = bench.open_tool("timestamp", "999999999999999", ToolOptions::new())?;
    assert!(!result.is_error);
    assert!(result.content.contains("Milliseconds: 999999999999999"));
    assert!(!result.content.contains("UTC:"));
    Ok(())
}

/// A corrupt preferences file does not block the session
#[test]
fn test_corrupt_preferences_recover() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join(PREFERENCES_FILE), "{\"lastUsedTool\": ")?;

    let mut bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);
    assert!(bench.current().is_none());
    bench.select("timestamp")?;

    let bench = Workbench::open(router(), JsonFileStore::open(temp_dir.path())?);
    assert_eq!(bench.current().map(|t| t.id()), Some("timestamp"));
    Ok(())
}
