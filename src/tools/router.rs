//! Tool routing and execution
//!
//! Defines the ToolRouter trait for dispatching calls by id and
//! LocalToolRouter for in-process execution against a catalog.

use std::collections::HashMap;

use crate::error::Result;

use super::catalog::ToolCatalog;
use super::definition::{ToolCall, ToolResult};
use super::options::ToolOptions;

/// Trait for routing and executing tool calls
pub trait ToolRouter {
    /// Run a call through the guard. Unknown ids are an `Err`; tool
    /// failures are an `Ok` result flagged as an error.
    fn execute(&self, call: ToolCall) -> Result<ToolResult>;

    /// Ids of the tools this router can run
    fn available_tools(&self) -> Vec<String>;
}

/// In-process router over a `ToolCatalog`
pub struct LocalToolRouter {
    catalog: ToolCatalog,
    defaults: HashMap<String, ToolOptions>,
}

impl LocalToolRouter {
    pub fn new(catalog: ToolCatalog) -> Self {
        Self {
            catalog,
            defaults: HashMap::new(),
        }
    }

    /// Per-tool default options, layered under each call's own options
    pub fn with_defaults(mut self, defaults: HashMap<String, ToolOptions>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    fn effective_options(&self, call: &ToolCall) -> ToolOptions {
        match self.defaults.get(&call.tool_id) {
            Some(defaults) => call.options.merged_over(defaults),
            None => call.options.clone(),
        }
    }
}

impl ToolRouter for LocalToolRouter {
    fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let tool = self.catalog.require(&call.tool_id)?;
        let options = self.effective_options(&call);

        log::debug!(
            "Running tool {} ({} input bytes, {} options)",
            call.tool_id,
            call.input.len(),
            options.len()
        );
        let outcome = tool.process(&call.input, &options);
        if let Err(e) = &outcome {
            log::info!("Tool {} failed: {}", call.tool_id, e);
        }
        Ok(ToolResult::from_outcome(call.tool_id, outcome))
    }

    fn available_tools(&self) -> Vec<String> {
        self.catalog.list().into_iter().map(String::from).collect()
    }
}
