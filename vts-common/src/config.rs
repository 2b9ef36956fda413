//! Configuration loading and data folder resolution
//!
//! Settings come from, in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: a warning is logged and defaults apply.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::{Error, Result};

/// Environment variable overriding the data folder
pub const ENV_DATA_FOLDER: &str = "VTS_DATA_FOLDER";

/// Subfolder of the data folder holding dataset files
pub const EMBEDDINGS_SUBDIR: &str = "embeddings";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TomlConfig {
    /// Folder containing `embeddings/` (optional)
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Dataset selected at startup
    #[serde(default = "default_dataset")]
    pub default_dataset: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_port() -> u16 {
    5000
}

fn default_dataset() -> String {
    "animals".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            data_folder: None,
            port: default_port(),
            default_dataset: default_dataset(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load configuration from a file
    ///
    /// A missing file yields defaults. An unreadable or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Platform config file location (`<config dir>/vtsearch/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vtsearch").join("config.toml"))
}

/// Resolve the data folder following the priority order above
pub fn resolve_data_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.data_folder {
        return path.clone();
    }

    // Priority 4: Compiled default
    default_data_folder()
}

/// OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("vtsearch"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Directory holding dataset files for a data folder
pub fn embeddings_dir(data_folder: &Path) -> PathBuf {
    data_folder.join(EMBEDDINGS_SUBDIR)
}
