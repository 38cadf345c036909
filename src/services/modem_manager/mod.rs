/// Bearer decoding
mod bearer;
/// High-level client API
mod client;
/// ModemManager errors and their classification
mod error;
/// Modem decoding
mod modem;
/// Sticky-error decode session over a wire value
mod parser;
/// Object path and interface name composition
pub mod paths;
/// Extended signal decoding
mod signal;
/// D-Bus access seam
mod transport;
/// Type definitions for ModemManager enums, ports and IP addressing.
mod types;
/// Loosely typed D-Bus values
mod value;

#[cfg(test)]
mod tests;

pub use bearer::{Bearer, IpConfig, decode_bearer, decode_ip_config};
pub use client::Client;
pub use error::{DecodeError, ErrorCategory, ModemError, names, to_not_found, to_permission};
pub use modem::{Modem, decode_modem, normalize_network_time};
pub use parser::ValueParser;
pub use signal::{
    CdmaSignal, EvdoSignal, GsmSignal, LteSignal, Nr5gSignal, Signal, UmtsSignal, decode_signal,
};
pub use transport::{DbusTransport, Transport};
pub use types::*;
pub use value::{PropertyMap, WireValue};
