//! In-memory preference store for tests and ephemeral sessions.

use std::sync::RwLock;

use super::traits::{PreferenceStore, Preferences};
use crate::error::{OktoolsError, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    prefs: RwLock<Preferences>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record
    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            prefs: RwLock::new(prefs),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Preferences> {
        let prefs = self.prefs.read().map_err(|e| OktoolsError::Storage(e.to_string()))?;
        Ok(prefs.clone())
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        let mut current = self.prefs.write().map_err(|e| OktoolsError::Storage(e.to_string()))?;
        *current = prefs.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::{PreferenceKey, Theme};
    use serde_json::json;

    #[test]
    fn test_last_used_tool() {
        let store = MemoryStore::new();
        assert_eq!(store.last_used_tool().unwrap(), None);
        store.set_last_used_tool("json-formatter").unwrap();
        assert_eq!(store.last_used_tool().unwrap().as_deref(), Some("json-formatter"));
    }

    #[test]
    fn test_keyed_get_and_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get(PreferenceKey::Theme).unwrap(), None);

        store.set(PreferenceKey::Theme, json!("dark")).unwrap();
        assert_eq!(store.get(PreferenceKey::Theme).unwrap(), Some(json!("dark")));
        assert_eq!(store.theme().unwrap(), Theme::Dark);

        store.set(PreferenceKey::LastUsedTool, json!("uuid-generator")).unwrap();
        assert_eq!(store.last_used_tool().unwrap().as_deref(), Some("uuid-generator"));
    }

    #[test]
    fn test_set_rejects_wrong_shape() {
        let store = MemoryStore::new();
        assert!(store.set(PreferenceKey::Theme, json!("purple")).is_err());
        assert!(store.set(PreferenceKey::SearchPreferences, json!(42)).is_err());
    }

    #[test]
    fn test_recent_searches() {
        let store = MemoryStore::new();
        store.record_search("json").unwrap();
        store.record_search("hash").unwrap();
        store.record_search("json").unwrap();
        assert_eq!(store.recent_searches().unwrap(), vec!["json", "hash"]);
    }
}
