// CLI configuration

use crate::filter::Filter;
use crate::store::DEFAULT_KEY;
use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings read from `config.yaml`
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the SQLite slot database
    pub store_path: PathBuf,
    /// Slot key the task list lives under
    pub key: String,
    /// Filter applied by `list` when none is given
    pub default_filter: Filter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            key: DEFAULT_KEY.to_string(),
            default_filter: Filter::All,
        }
    }
}

impl Config {
    /// Read config from `path`, or from the default location when `None`
    ///
    /// A missing file gives the defaults. A file that exists but does not
    /// parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            debug!(path = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

/// `<config dir>/todostore/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("todostore").join("config.yaml"))
}

/// `<data dir>/todostore`, or `.todostore` when no data dir is known
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("todostore"))
        .unwrap_or_else(|| PathBuf::from(".todostore"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.key, "tasks");
        assert_eq!(config.default_filter, Filter::All);
        assert!(config.store_path.ends_with("todostore") || config.store_path.ends_with(".todostore"));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("default_filter: active\n").unwrap();
        assert_eq!(config.default_filter, Filter::Active);
        assert_eq!(config.key, "tasks");
    }

    #[test]
    fn test_from_yaml_full() {
        let config = Config::from_yaml(
            "store_path: /tmp/todo\nkey: work\ndefault_filter: completed\n",
        )
        .unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/todo"));
        assert_eq!(config.key, "work");
        assert_eq!(config.default_filter, Filter::Completed);
    }

    #[test]
    fn test_from_yaml_filter_ignores_case() {
        let config = Config::from_yaml("default_filter: Active\n").unwrap();
        assert_eq!(config.default_filter, Filter::Active);
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_yaml_invalid_filter() {
        assert!(Config::from_yaml("default_filter: someday\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(temp.path().join("absent.yaml").as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "key: groceries\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.key, "groceries");
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "key: [unterminated\n").unwrap();

        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
