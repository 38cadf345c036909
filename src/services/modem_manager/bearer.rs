//! Bearer and IP configuration decoding.

use std::{net::IpAddr, time::Duration};

use zbus::zvariant::ObjectPath;

use super::{
    DecodeError,
    parser::ValueParser,
    paths,
    types::{BearerIpMethod, IpFamily, IpNet},
    value::PropertyMap,
};

/// Cellular data connection of a modem, from the
/// `org.freedesktop.ModemManager1.Bearer` interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bearer {
    /// The `N` in the bearer's `/Bearer/N` object path.
    pub index: u32,
    /// Whether the bearer is connected.
    pub connected: bool,
    /// Data network interface, e.g. `wwan0`.
    pub interface: String,
    /// Maximum time to wait for a successful IP establishment.
    pub ip_timeout: Duration,
    /// IPv4 configuration, when reported.
    pub ipv4_config: Option<IpConfig>,
    /// IPv6 configuration, when reported.
    pub ipv6_config: Option<IpConfig>,
    /// Whether the connection is suspended while the modem is not registered.
    pub suspended: bool,
}

/// IPv4 or IPv6 configuration of a bearer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpConfig {
    /// Interface address and mask.
    pub address: Option<IpNet>,
    /// DNS servers, sorted by address bytes.
    pub dns: Vec<IpAddr>,
    /// Default gateway.
    pub gateway: Option<IpAddr>,
    /// How the host should obtain its configuration.
    pub method: BearerIpMethod,
    /// Maximum transmission unit, or zero when unknown.
    pub mtu: u32,
}

/// Decodes a bearer's properties map.
///
/// The index comes from the trailing segment of `path`, not from the map.
///
/// # Errors
///
/// Returns `DecodeError::BearerIndex` if `path` does not end in a number, or
/// `DecodeError::Field` naming the first property with a malformed value.
pub fn decode_bearer(path: &ObjectPath<'_>, properties: &PropertyMap) -> Result<Bearer, DecodeError> {
    let mut bearer = Bearer {
        index: paths::bearer_index(path)?,
        ..Bearer::default()
    };

    for (key, value) in properties {
        let mut vp = ValueParser::new(value);
        let nested = match key.as_str() {
            "Connected" => {
                bearer.connected = vp.bool();
                Ok(())
            }
            "Interface" => {
                bearer.interface = vp.string();
                Ok(())
            }
            "IpTimeout" => {
                bearer.ip_timeout = vp.duration_secs();
                Ok(())
            }
            "Ip4Config" => decode_ip_config(&vp.properties(), IpFamily::V4)
                .map(|config| bearer.ipv4_config = Some(config)),
            "Ip6Config" => decode_ip_config(&vp.properties(), IpFamily::V6)
                .map(|config| bearer.ipv6_config = Some(config)),
            "Suspended" => {
                bearer.suspended = vp.bool();
                Ok(())
            }
            _ => Ok(()),
        };

        vp.finish()
            .and(nested)
            .map_err(|err| DecodeError::field(key, err))?;
    }

    Ok(bearer)
}

/// Decodes an `Ip4Config` or `Ip6Config` map.
///
/// `address` and `prefix` fill the two halves of [`IpConfig::address`] and
/// may arrive in either order or alone.
///
/// # Errors
///
/// Returns `DecodeError::Field` naming the first key with a malformed value.
pub fn decode_ip_config(properties: &PropertyMap, family: IpFamily) -> Result<IpConfig, DecodeError> {
    let mut config = IpConfig::default();

    for (key, value) in properties {
        let mut vp = ValueParser::new(value);
        match key.as_str() {
            "address" => config.address.get_or_insert_with(IpNet::default).address = vp.ip(),
            "prefix" => config.address.get_or_insert_with(IpNet::default).mask = vp.mask(family),
            "dns1" | "dns2" | "dns3" => config.dns.extend(vp.ip()),
            "gateway" => config.gateway = vp.ip(),
            "method" => config.method = BearerIpMethod::from(vp.int()),
            "mtu" => config.mtu = vp.uint32(),
            _ => {}
        }

        vp.finish().map_err(|err| DecodeError::field(key, err))?;
    }

    config.dns.sort_by_key(|ip| dns_sort_key(*ip));

    Ok(config)
}

/// Orders addresses by their 16-byte form, IPv4 as IPv4-mapped IPv6.
fn dns_sort_key(ip: IpAddr) -> [u8; 16] {
    match ip {
        IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
        IpAddr::V6(v6) => v6.octets(),
    }
}
