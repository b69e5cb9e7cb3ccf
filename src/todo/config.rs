use crate::error::{Result, TodoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Configuration for todo, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoConfig {
    /// chrono format used to enter and display due dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many times a required prompt is repeated before the command gives up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pretty-print collection files when they are flushed
    #[serde(default)]
    pub pretty_json: bool,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            pretty_json: false,
        }
    }
}

impl TodoConfig {
    pub const KEYS: &'static [&'static str] = &["date-format", "max-attempts", "pretty-json"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodoError::Io)?;
        let config: TodoConfig =
            serde_json::from_str(&content).map_err(|source| TodoError::Corrupt {
                path: config_path.clone(),
                source,
            })?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodoError::Serialization)?;
        fs::write(config_path, content).map_err(TodoError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "date-format" => Some(self.date_format.clone()),
            "max-attempts" => Some(self.max_attempts.to_string()),
            "pretty-json" => Some(self.pretty_json.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "date-format" => {
                if value.trim().is_empty() || !value.contains('%') {
                    return Err(format!("'{}' is not a date format (e.g. %Y-%m-%d)", value));
                }
                self.date_format = value.to_string();
            }
            "max-attempts" => {
                let attempts: u32 = value
                    .parse()
                    .map_err(|_| format!("'{}' is not a positive number", value))?;
                if attempts == 0 {
                    return Err("max-attempts must be at least 1".to_string());
                }
                self.max_attempts = attempts;
            }
            "pretty-json" => {
                self.pretty_json = value
                    .parse()
                    .map_err(|_| format!("'{}' is not true or false", value))?;
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TodoConfig::default();
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.max_attempts, 3);
        assert!(!config.pretty_json);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = TodoConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, TodoConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("todo");

        let mut config = TodoConfig::default();
        config.set("date-format", "%d/%m/%Y").unwrap();
        config.set("pretty-json", "true").unwrap();
        config.save(&nested).unwrap();

        let loaded = TodoConfig::load(&nested).unwrap();
        assert_eq!(loaded.date_format, "%d/%m/%Y");
        assert!(loaded.pretty_json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), r#"{"max_attempts": 5}"#).unwrap();

        let config = TodoConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "nope").unwrap();
        assert!(matches!(
            TodoConfig::load(temp_dir.path()),
            Err(TodoError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = TodoConfig::default();
        assert!(config.set("max-attempts", "0").is_err());
        assert!(config.set("max-attempts", "many").is_err());
        assert!(config.set("pretty-json", "yes").is_err());
        assert!(config.set("date-format", "yyyy").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, TodoConfig::default());
    }

    #[test]
    fn test_get_known_keys() {
        let config = TodoConfig::default();
        for key in TodoConfig::KEYS {
            assert!(config.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(config.get("nope"), None);
    }
}
