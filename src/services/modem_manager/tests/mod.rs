//! Unit tests for modem_manager module
//!
//! Decoders and classification are exercised on hand-built wire values.
//! No D-Bus connection is needed.

#![allow(clippy::unwrap_used, clippy::panic)]

mod errors;
mod parser;

use super::{PropertyMap, WireValue};

/// Builds a property map from `(key, value)` pairs.
fn props<const N: usize>(entries: [(&str, WireValue); N]) -> PropertyMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

fn port(name: &str, port_type: u32) -> WireValue {
    WireValue::Struct(vec![WireValue::from(name), WireValue::from(port_type)])
}
