//! Host integration: the message bus and the side panel session

mod messages;
mod session;

pub use messages::{CONTEXT_MENU, ContextMenuItem, HostMessage, open_from_context_menu, relay};
pub use session::Workbench;
