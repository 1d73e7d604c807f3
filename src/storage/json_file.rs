//! JSON file preference store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::traits::{PreferenceStore, Preferences};
use crate::error::{OktoolsError, Result};

/// File name inside the state directory
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Preferences persisted as one JSON document, rewritten whole on each save,
/// with an in-memory copy serving reads.
pub struct JsonFileStore {
    path: PathBuf,
    cache: RwLock<Preferences>,
}

impl JsonFileStore {
    /// Open (or create) `<state_dir>/preferences.json`
    pub fn open(state_dir: impl AsRef<Path>) -> Result<Self> {
        let state_dir = state_dir.as_ref();
        fs::create_dir_all(state_dir)?;
        let path = state_dir.join(PREFERENCES_FILE);

        let prefs = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Preferences::default()
            } else {
                // The next save overwrites an unreadable file
                serde_json::from_str(&content).unwrap_or_else(|e| {
                    log::warn!("Ignoring unreadable preferences in {}: {}", path.display(), e);
                    Preferences::default()
                })
            }
        } else {
            Preferences::default()
        };

        log::debug!("Opened preference store at {}", path.display());
        Ok(Self {
            path,
            cache: RwLock::new(prefs),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Result<Preferences> {
        let cache = self.cache.read().map_err(|e| OktoolsError::Storage(e.to_string()))?;
        Ok(cache.clone())
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        // File first, then cache
        let content = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, content)?;

        let mut cache = self.cache.write().map_err(|e| OktoolsError::Storage(e.to_string()))?;
        *cache = prefs.clone();
        log::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}
