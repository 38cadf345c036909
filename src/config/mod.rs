//! Client configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid
//! configuration.

mod error;
mod log_level;

#[cfg(test)]
mod tests;

use std::{fs, path::Path, time::Duration};

pub use error::ConfigError;
pub use log_level::LogLevel;
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

const DEFAULT_CALL_TIMEOUT_SECS: u64 = 25;

/// Settings for [`Client`](crate::services::modem_manager::Client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClientConfig {
    /// Seconds to wait for each D-Bus call before giving up.
    pub call_timeout_secs: u64,

    /// Logging level used by [`tracing_config::init`](crate::tracing_config::init).
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            log_level: LogLevel::default(),
        }
    }
}

impl ClientConfig {
    /// Timeout applied to each D-Bus call.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Parses a configuration from a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::TomlParse` if the document is not valid TOML or
    /// does not match the configuration schema.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse(e, None))
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::TomlParse` if its content is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::toml_parse(e, Some(path)))
    }

    /// JSON schema describing the configuration file, pretty printed.
    ///
    /// # Errors
    /// Returns `ConfigError::Schema` if the schema cannot be serialized.
    pub fn schema_json() -> Result<String, ConfigError> {
        let schema = schema_for!(ClientConfig);
        serde_json::to_string_pretty(&schema).map_err(ConfigError::Schema)
    }
}
