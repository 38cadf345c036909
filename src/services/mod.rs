/// Shared helpers for service implementations
mod common;
/// ModemManager control service
pub mod modem_manager;
