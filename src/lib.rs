//! modemmanager - Query and control ModemManager devices over D-Bus.
//!
//! ModemManager exposes its modems, bearers and signal data as loosely typed
//! D-Bus properties. This crate decodes those variant values into strongly
//! typed structures and maps the daemon's error names onto a small set of
//! categories callers can test for.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use modemmanager::{ClientConfig, services::modem_manager::Client};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::connect(&ClientConfig::default()).await?;
//! println!("ModemManager v{}", client.version());
//!
//! let modem = client.modem(0).await?;
//! println!("{} {} ({})", modem.manufacturer, modem.model, modem.state);
//! # Ok(())
//! # }
//! ```

/// Client configuration loaded from TOML.
pub mod config;

/// D-Bus backed services.
pub mod services;

/// Logging initialisation.
pub mod tracing_config;

pub use config::{ClientConfig, ConfigError, LogLevel};
pub use services::modem_manager::{DecodeError, ErrorCategory, ModemError};
