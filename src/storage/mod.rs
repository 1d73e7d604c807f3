//! Preference persistence
//!
//! A single typed record (`lastUsedTool`, recent searches, theme) behind the
//! `PreferenceStore` trait, with a JSON file backend and an in-memory one.

mod json_file;
mod memory;
mod traits;

pub use json_file::{JsonFileStore, PREFERENCES_FILE};
pub use memory::MemoryStore;
pub use traits::{
    MAX_RECENT_SEARCHES, PreferenceKey, PreferenceStore, Preferences, SearchPreferences, Theme,
};
