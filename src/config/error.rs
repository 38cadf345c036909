use std::{fmt, io, path::Path, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading a [`ClientConfig`](super::ClientConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O operation error
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path where the I/O error occurred
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// JSON schema serialization error
    #[error("failed to serialize schema: {0}")]
    Schema(#[source] serde_json::Error),
}

impl ConfigError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| String::from("string"));

        Self::TomlParse {
            location,
            details: error.to_string(),
        }
    }
}
