//! Host messages exchanged between the background relay and the side panel.
//!
//! Messages are JSON objects tagged by `type`:
//! `{"type": "OPEN_TOOL", "toolId": "...", "input": "..."}`.

use serde::{Deserialize, Serialize};

use crate::error::{OktoolsError, Result};

/// A message on the host bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    /// Request to open a tool, sent by the popup or a context menu
    OpenTool {
        #[serde(rename = "toolId")]
        tool_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<String>,
    },
    /// Broadcast telling the side panel to load a tool
    LoadTool {
        #[serde(rename = "toolId")]
        tool_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        input: Option<String>,
    },
}

impl HostMessage {
    pub fn open(tool_id: impl Into<String>, input: Option<String>) -> Self {
        HostMessage::OpenTool {
            tool_id: tool_id.into(),
            input,
        }
    }

    pub fn load(tool_id: impl Into<String>, input: Option<String>) -> Self {
        HostMessage::LoadTool {
            tool_id: tool_id.into(),
            input,
        }
    }

    pub fn tool_id(&self) -> &str {
        match self {
            HostMessage::OpenTool { tool_id, .. } | HostMessage::LoadTool { tool_id, .. } => tool_id,
        }
    }

    pub fn input(&self) -> Option<&str> {
        match self {
            HostMessage::OpenTool { input, .. } | HostMessage::LoadTool { input, .. } => {
                input.as_deref()
            }
        }
    }

    /// Parse one JSON message
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| OktoolsError::Message(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Background relay: OPEN_TOOL becomes a LOAD_TOOL broadcast.
/// LOAD_TOOL is already a broadcast and is not relayed again.
pub fn relay(message: &HostMessage) -> Option<HostMessage> {
    match message {
        HostMessage::OpenTool { tool_id, input } => {
            log::info!("Relaying OPEN_TOOL for {} as LOAD_TOOL", tool_id);
            Some(HostMessage::load(tool_id.clone(), input.clone()))
        }
        HostMessage::LoadTool { .. } => None,
    }
}

/// A selection context-menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenuItem {
    pub id: &'static str,
    pub title: &'static str,
    /// `None` when the target tool is not available in this build
    pub tool_id: Option<&'static str>,
}

pub const CONTEXT_MENU: &[ContextMenuItem] = &[
    ContextMenuItem {
        id: "oktools-json",
        title: "Format JSON",
        tool_id: Some("json-formatter"),
    },
    ContextMenuItem {
        id: "oktools-base64",
        title: "Base64 Encode",
        tool_id: Some("base64"),
    },
    ContextMenuItem {
        id: "oktools-url",
        title: "URL Encode",
        tool_id: Some("url-encode"),
    },
    ContextMenuItem {
        id: "oktools-qrcode",
        title: "Generate QR Code",
        tool_id: None,
    },
    ContextMenuItem {
        id: "oktools-timestamp",
        title: "Convert Timestamp",
        tool_id: Some("timestamp"),
    },
];

/// Build the OPEN_TOOL message for a context-menu click on `selection`
pub fn open_from_context_menu(menu_id: &str, selection: &str) -> Result<HostMessage> {
    let item = CONTEXT_MENU
        .iter()
        .find(|item| item.id == menu_id)
        .ok_or_else(|| OktoolsError::Message(format!("unknown context menu '{}'", menu_id)))?;
    let tool_id = item.tool_id.ok_or_else(|| {
        OktoolsError::Message(format!("'{}' is not supported", item.title))
    })?;
    Ok(HostMessage::open(tool_id, Some(selection.to_string())))
}
