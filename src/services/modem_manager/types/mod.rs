//! Type definitions for ModemManager enums, ports and IP addressing.

mod ip;
mod port;
mod states;

pub use ip::{IpFamily, IpMask, IpNet};
pub use port::{Port, PortType};
pub use states::{BearerIpMethod, ModemState, PowerState};
