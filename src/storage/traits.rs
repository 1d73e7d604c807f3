//! Preference record and the storage trait.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OktoolsError, Result};

/// Recent searches kept, newest first
pub const MAX_RECENT_SEARCHES: usize = 10;

/// Color theme of the host surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPreferences {
    #[serde(default)]
    pub recent_searches: Vec<String>,
}

impl SearchPreferences {
    /// Move `query` to the front, dropping duplicates and the overflow
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.recent_searches.retain(|q| q != query);
        self.recent_searches.insert(0, query.to_string());
        self.recent_searches.truncate(MAX_RECENT_SEARCHES);
    }
}

/// Everything the host persists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_preferences: Option<SearchPreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

/// Keys of the persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    LastUsedTool,
    SearchPreferences,
    Theme,
}

impl PreferenceKey {
    /// Field name in the stored JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::LastUsedTool => "lastUsedTool",
            PreferenceKey::SearchPreferences => "searchPreferences",
            PreferenceKey::Theme => "theme",
        }
    }
}

/// Storage for the preference record.
///
/// Implementors provide whole-record `load`/`save`; keyed and typed
/// accessors are built on top of those.
pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> Result<Preferences>;

    fn save(&self, prefs: &Preferences) -> Result<()>;

    /// Raw value stored under `key`
    fn get(&self, key: PreferenceKey) -> Result<Option<Value>> {
        let value = serde_json::to_value(self.load()?)?;
        Ok(value.get(key.as_str()).filter(|v| !v.is_null()).cloned())
    }

    /// Replace the value under `key`; the value must fit the record's schema
    fn set(&self, key: PreferenceKey, value: Value) -> Result<()> {
        let mut record = serde_json::to_value(self.load()?)?;
        let Some(map) = record.as_object_mut() else {
            return Err(OktoolsError::Storage("preference record is not an object".to_string()));
        };
        map.insert(key.as_str().to_string(), value);
        let prefs: Preferences = serde_json::from_value(record).map_err(|e| {
            OktoolsError::Storage(format!("invalid value for {}: {}", key.as_str(), e))
        })?;
        self.save(&prefs)
    }

    fn last_used_tool(&self) -> Result<Option<String>> {
        Ok(self.load()?.last_used_tool)
    }

    fn set_last_used_tool(&self, tool_id: &str) -> Result<()> {
        let mut prefs = self.load()?;
        prefs.last_used_tool = Some(tool_id.to_string());
        self.save(&prefs)
    }

    fn recent_searches(&self) -> Result<Vec<String>> {
        Ok(self
            .load()?
            .search_preferences
            .map(|s| s.recent_searches)
            .unwrap_or_default())
    }

    fn record_search(&self, query: &str) -> Result<()> {
        let mut prefs = self.load()?;
        prefs
            .search_preferences
            .get_or_insert_with(SearchPreferences::default)
            .record(query);
        self.save(&prefs)
    }

    fn theme(&self) -> Result<Theme> {
        Ok(self.load()?.theme.unwrap_or_default())
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        let mut prefs = self.load()?;
        prefs.theme = Some(theme);
        self.save(&prefs)
    }
}
