//! Side panel session
//!
//! `Workbench` is what the side panel does with the registry: it restores
//! the last used tool on startup, persists every selection, runs tools, and
//! reacts to LOAD_TOOL / OPEN_TOOL messages.

use crate::error::{OktoolsError, Result};
use crate::storage::{PreferenceStore, Theme};
use crate::tools::{LocalToolRouter, Tool, ToolCall, ToolOptions, ToolResult, ToolRouter};

use super::messages::HostMessage;

pub struct Workbench<S: PreferenceStore> {
    router: LocalToolRouter,
    store: S,
    current: Option<&'static str>,
}

impl<S: PreferenceStore> Workbench<S> {
    /// Start a session, restoring the last used tool when it still exists
    pub fn open(router: LocalToolRouter, store: S) -> Self {
        let current = match store.last_used_tool() {
            Ok(Some(id)) => match router.catalog().get(&id) {
                Some(tool) => {
                    log::info!("Restored last used tool: {}", id);
                    Some(tool.id())
                }
                None => {
                    log::debug!("Ignoring unknown last used tool: {}", id);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read last used tool: {}", e);
                None
            }
        };

        Self {
            router,
            store,
            current,
        }
    }

    pub fn router(&self) -> &LocalToolRouter {
        &self.router
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Currently selected tool
    pub fn current(&self) -> Option<&dyn Tool> {
        self.current.and_then(|id| self.router.catalog().get(id))
    }

    /// Make `tool_id` current and remember it as last used
    pub fn select(&mut self, tool_id: &str) -> Result<&dyn Tool> {
        let id = self.router.catalog().require(tool_id)?.id();
        self.store.set_last_used_tool(id)?;
        self.current = Some(id);
        log::info!("Selected tool: {}", id);
        self.router.catalog().require(id)
    }

    /// Run the current tool
    pub fn run(&self, input: &str, options: ToolOptions) -> Result<ToolResult> {
        let id = self
            .current
            .ok_or_else(|| OktoolsError::InvalidInput("no tool selected".to_string()))?;
        self.router.execute(ToolCall::new(id, input).with_options(options))
    }

    /// Select then run
    pub fn open_tool(&mut self, tool_id: &str, input: &str, options: ToolOptions) -> Result<ToolResult> {
        self.select(tool_id)?;
        self.run(input, options)
    }

    /// React to a host message. The named tool becomes current; when the
    /// message carries input, the tool runs on it and the guarded result is
    /// returned.
    pub fn handle(&mut self, message: &HostMessage) -> Result<Option<ToolResult>> {
        log::debug!("Side panel received {:?}", message);
        self.select(message.tool_id())?;
        match message.input() {
            Some(input) => self.run(input, ToolOptions::new()).map(Some),
            None => Ok(None),
        }
    }

    /// Filter the registry and remember the query
    pub fn search(&self, query: &str) -> Result<Vec<&dyn Tool>> {
        self.store.record_search(query)?;
        Ok(self.router.catalog().search(query))
    }

    pub fn recent_searches(&self) -> Result<Vec<String>> {
        self.store.recent_searches()
    }

    pub fn theme(&self) -> Result<Theme> {
        self.store.theme()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Theme> {
        self.store.set_theme(theme)?;
        Ok(theme)
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        self.set_theme(self.theme()?.toggled())
    }
}
