//! oktools - a registry of developer utility tools
//!
//! Every tool is a pure string transformation (`Tool::process`) plus a
//! declarative description of its options. The registry, the host message
//! bus and the side panel session sit on top, with preferences persisted
//! through a `PreferenceStore`.

pub mod detect;
pub mod error;
pub mod host;
pub mod storage;
pub mod tools;

pub use error::{OktoolsError, Result};
