use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logging verbosity.
///
/// `RUST_LOG`, when set, takes precedence over this value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only failures.
    Error,

    /// Failures and suspicious replies from the daemon.
    Warn,

    /// Connection events (default level).
    #[default]
    Info,

    /// Decoded objects and method calls.
    Debug,

    /// Every D-Bus round trip.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
