//! Configuration management for diskpass.
//!
//! Configuration is a TOML file located by, in order: an explicit path,
//! the `DISKPASS_CONFIG_PATH` environment variable, or `~/.diskpass.toml`.
//!
//! Two kinds of values live in it. The `[base_config]` and `[file_resources]`
//! sections are free-form string tables read through [`Config::get`] and
//! [`Config::get_file_path`], because the emulator choice selects which
//! `[file_resources]` key names the automation script. The `[batch]` and
//! `[logging]` sections are typed and fully defaulted.

mod resources;
mod types;
mod validate;

pub use resources::AutomationResources;
pub use types::*;

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_OVERRIDE: &str = "DISKPASS_CONFIG_PATH";

/// File name of the config file in the user's home directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".diskpass.toml";

/// Section holding general settings such as the resource base path.
pub const BASE_CONFIG: &str = "base_config";

/// Section mapping resource names to file paths.
pub const FILE_RESOURCES: &str = "file_resources";

/// Loaded configuration: the raw lookup table plus the typed sections.
#[derive(Debug, Clone)]
pub struct Config {
    source_path: PathBuf,
    table: toml::Table,

    /// Batch layout and external program settings
    pub batch: BatchSettings,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TypedSections {
    batch: BatchSettings,
    logging: LoggingConfig,
}

impl Config {
    /// Locate and load the configuration file.
    ///
    /// Unlike optional settings files, a missing config is an error: the
    /// resource paths it names are required before any image is processed.
    pub fn load(path_override: Option<&Path>) -> Result<Self, ConfigError> {
        let env_value = std::env::var(CONFIG_ENV_OVERRIDE).ok();
        let path = Self::resolve_path(path_override, env_value.as_deref());
        Self::load_from(&path)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let path = std::path::absolute(path)?;
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(path, &content)
    }

    /// Parse configuration from TOML text, recording `source_path` for error messages.
    pub fn from_toml_str(source_path: PathBuf, content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = content.parse()?;
        let typed: TypedSections = toml::from_str(content)?;
        typed.batch.validate()?;
        Ok(Self {
            source_path,
            table,
            batch: typed.batch,
            logging: typed.logging,
        })
    }

    /// Pick the config file location: explicit path, then environment value, then default.
    pub fn resolve_path(path_override: Option<&Path>, env_value: Option<&str>) -> PathBuf {
        if let Some(path) = path_override {
            return path.to_path_buf();
        }
        match env_value {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => Self::default_path(),
        }
    }

    /// Get the default config file path (`<home>/.diskpass.toml`).
    ///
    /// Falls back to `$HOME`, then the current directory, if home directory
    /// detection fails.
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| {
                PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
            })
            .join(DEFAULT_CONFIG_FILE_NAME)
    }

    /// Path of the file this configuration was loaded from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Look up a string value. Performs no validation beyond presence.
    pub fn get(&self, section: &str, key: &str) -> Result<String, ConfigError> {
        let value = self
            .table
            .get(section)
            .and_then(|s| s.as_table())
            .and_then(|s| s.get(key))
            .ok_or_else(|| self.lookup_error(section, key, "not found".to_string()))?;

        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.lookup_error(section, key, format!("is not a string ({value})")))
    }

    /// Look up a value that must name an existing file.
    ///
    /// The value is tilde-expanded. When `base_path` is given and the value
    /// is a bare file name, it is resolved relative to `base_path`.
    pub fn get_file_path(
        &self,
        section: &str,
        key: &str,
        base_path: Option<&Path>,
    ) -> Result<PathBuf, ConfigError> {
        let raw = self.get(section, key)?;
        let mut file_path = PathBuf::from(shellexpand::tilde(&raw).into_owned());

        if let Some(base) = base_path {
            let is_bare_name = file_path
                .parent()
                .map_or(true, |parent| parent.as_os_str().is_empty());
            if is_bare_name {
                file_path = base.join(file_path);
            }
        }

        if file_path.is_file() {
            Ok(file_path)
        } else {
            Err(self.lookup_error(
                section,
                key,
                format!("the value [{}] is not a file", file_path.display()),
            ))
        }
    }

    fn lookup_error(&self, section: &str, key: &str, message: String) -> ConfigError {
        ConfigError::Lookup {
            source_path: self.source_path.clone(),
            section: section.to_string(),
            key: key.to_string(),
            message,
        }
    }
}
