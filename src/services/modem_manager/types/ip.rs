use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// IP address family of a bearer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpFamily {
    /// IPv4, 32-bit addresses.
    #[default]
    V4,
    /// IPv6, 128-bit addresses.
    V6,
}

impl IpFamily {
    /// Address width in bits.
    pub fn bits(self) -> u8 {
        match self {
            Self::V4 => 32,
            Self::V6 => 128,
        }
    }
}

/// A network mask made of `prefix` leading one bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpMask {
    prefix: u8,
    family: IpFamily,
}

impl IpMask {
    /// Builds a mask, or `None` if `prefix` exceeds the family's width.
    pub fn new(prefix: u8, family: IpFamily) -> Option<Self> {
        (prefix <= family.bits()).then_some(Self { prefix, family })
    }

    /// Number of leading one bits.
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Address family the mask applies to.
    pub fn family(&self) -> IpFamily {
        self.family
    }

    /// The mask in dotted or colon notation, e.g. `255.255.255.0`.
    pub fn netmask(&self) -> IpAddr {
        let host_bits = u32::from(self.family.bits() - self.prefix);
        match self.family {
            IpFamily::V4 => {
                IpAddr::V4(Ipv4Addr::from(u32::MAX.checked_shl(host_bits).unwrap_or(0)))
            }
            IpFamily::V6 => {
                IpAddr::V6(Ipv6Addr::from(u128::MAX.checked_shl(host_bits).unwrap_or(0)))
            }
        }
    }
}

/// An address and mask pair.
///
/// ModemManager reports the two halves under separate keys, so either may be
/// absent when the other is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IpNet {
    /// Interface address.
    pub address: Option<IpAddr>,
    /// Network mask.
    pub mask: Option<IpMask>,
}
