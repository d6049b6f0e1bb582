//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from an optional TOML file. The data root folder
//! is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. `AIRQ_ROOT_FOLDER` environment variable
//! 3. `root_folder` in the TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data root folder
pub const ROOT_FOLDER_ENV: &str = "AIRQ_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DEFAULT_DATABASE_FILE: &str = "air_quality.sqlite";

/// Where a loaded [`TomlConfig`] came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// Built-in defaults
    Defaults { reason: String },
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "config file {}", path.display()),
            ConfigSource::Defaults { reason } => write!(f, "built-in defaults ({})", reason),
        }
    }
}

/// Bootstrap configuration loaded from TOML
///
/// Every field is optional in the file; missing fields take built-in defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    /// Readings database path. Relative paths are resolved against the root folder.
    pub database_path: Option<PathBuf>,

    /// Root folder holding the readings database
    pub root_folder: Option<PathBuf>,

    /// HTTP bind address
    pub host: String,

    /// HTTP server port
    pub port: u16,

    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    pub level: String,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            root_folder: None,
            host: "127.0.0.1".to_string(),
            port: 5006,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, falling back to defaults
    ///
    /// With an explicit path, a missing or invalid file is an error. Without
    /// one, the platform config location is tried and any problem with it
    /// falls back to defaults. The returned [`ConfigSource`] says which
    /// happened so the caller can log it once logging is set up.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        Ok(Self::load_from_candidate(default_config_path()))
    }

    fn load_from_candidate(candidate: Option<PathBuf>) -> (Self, ConfigSource) {
        let Some(path) = candidate else {
            return (
                Self::default(),
                ConfigSource::Defaults {
                    reason: "no config file found".to_string(),
                },
            );
        };

        match Self::load(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => (
                Self::default(),
                ConfigSource::Defaults {
                    reason: format!("ignoring {}: {}", path.display(), e),
                },
            ),
        }
    }

    /// Database path given the resolved root folder
    pub fn database_path_in(&self, root_folder: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root_folder.join(path),
            None => root_folder.join(DEFAULT_DATABASE_FILE),
        }
    }
}

/// Resolve the root folder per the priority order above
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Platform config file location, if one exists
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("airq").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/airq/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/airq
        dirs::data_local_dir()
            .map(|d| d.join("airq"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/airq"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/airq
        dirs::data_dir()
            .map(|d| d.join("airq"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/airq"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\airq
        dirs::data_local_dir()
            .map(|d| d.join("airq"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\airq"))
    } else {
        PathBuf::from("./airq_data")
    }
}
