use eyre::{Context, Result};
use oktools::tools::ToolOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub storage: StorageConfig,
    pub output: OutputConfig,
    /// Per-tool default options, keyed by tool id
    pub tools: HashMap<String, Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(env!("CARGO_PKG_NAME")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            storage: StorageConfig::default(),
            output: OutputConfig::default(),
            tools: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Tool defaults in the shape the router expects
    pub fn tool_defaults(&self) -> HashMap<String, ToolOptions> {
        self.tools
            .iter()
            .map(|(id, options)| (id.clone(), ToolOptions::from(options.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert!(config.output.color);
        assert!(config.tools.is_empty());
        assert!(config.storage.state_dir.ends_with("oktools"));
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "output:\n  color: false\ntools:\n  json-formatter:\n    indent: 4\n    mode: format\n"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert!(!config.output.color);
        assert_eq!(config.log_level.as_deref(), Some("info"));

        let defaults = config.tool_defaults();
        let json = &defaults["json-formatter"];
        assert_eq!(json.get("indent"), Some(&serde_json::json!(4)));
        assert_eq!(json.get("mode"), Some(&serde_json::json!("format")));
    }

    #[test]
    fn test_load_state_dir() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "storage:\n  state_dir: /tmp/oktools-state\n").unwrap();
        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.storage.state_dir, PathBuf::from("/tmp/oktools-state"));
    }

    #[test]
    fn test_explicit_missing_file_errors() {
        let missing = PathBuf::from("/nonexistent/oktools.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "output: [unclosed").unwrap();
        assert!(Config::load(Some(&file.path().to_path_buf())).is_err());
    }
}
