//! Tool system - tool definitions, the built-in catalog, and routing

mod catalog;
mod definition;
mod options;
mod router;

pub mod developer;
pub mod encryption;
pub mod image;
pub mod text;
pub mod time;
pub mod utilities;

pub use catalog::ToolCatalog;
pub use definition::{
    ERROR_GLYPH, SurfaceField, Tool, ToolCall, ToolCategory, ToolResult, ToolSurface, require_input,
};
pub use options::ToolOptions;
pub use router::{LocalToolRouter, ToolRouter};
