//! Application configuration loaded from YAML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "COURSE_QUERY_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Table view settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Total line width the table is fitted to.
    pub width: usize,
    /// Columns shown side by side.
    pub max_columns: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 120,
            max_columns: 3,
        }
    }
}

/// Policy for writing documents to files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Refuse output paths without a `.json` extension.
    pub require_json_extension: bool,
    /// Replace existing files instead of refusing.
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            require_json_extension: true,
            overwrite: false,
        }
    }
}

impl AppConfig {
    /// Load configuration with precedence: explicit path > `COURSE_QUERY_CONFIG` > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path: Option<PathBuf> = match path {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        };

        match path {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&contents)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse YAML: {}", e)))?;
        if config.display.max_columns == 0 {
            return Err(Error::Config("display.max_columns must be at least 1".to_string()));
        }
        Ok(config)
    }
}
