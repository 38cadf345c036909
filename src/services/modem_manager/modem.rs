//! Modem decoding and network time handling.

use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};
use zbus::zvariant::OwnedObjectPath;

use super::{
    DecodeError,
    parser::ValueParser,
    types::{ModemState, Port, PowerState},
    value::PropertyMap,
};

/// A device controlled by ModemManager.
///
/// Built once from the `org.freedesktop.ModemManager1.Modem` properties and
/// never updated; fetch the modem again for fresh values. Calling methods on
/// a modem through [`Client`](super::Client) usually requires elevated
/// privileges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modem {
    /// Position in the manager's modem list, the `N` in `/Modem/N`.
    pub index: u32,
    /// Description of the carrier-specific configuration in use.
    pub carrier_configuration: String,
    /// Revision of the carrier-specific configuration in use.
    pub carrier_configuration_revision: String,
    /// Physical device reference, e.g. a sysfs path.
    pub device: String,
    /// Unique identifier of the device computed by ModemManager.
    pub device_identifier: String,
    /// IMEI, ESN or MEID of the modem.
    pub equipment_identifier: String,
    /// Hardware revision as reported by the modem.
    pub hardware_revision: String,
    /// Equipment manufacturer.
    pub manufacturer: String,
    /// Equipment model.
    pub model: String,
    /// Name of the plugin handling the modem.
    pub plugin: String,
    /// Ports exposed by the modem, in the order reported.
    pub ports: Vec<Port>,
    /// Current power state.
    pub power_state: PowerState,
    /// Name of the primary control port.
    pub primary_port: String,
    /// Firmware revision.
    pub revision: String,
    /// Overall modem state.
    pub state: ModemState,

    bearers: Vec<OwnedObjectPath>,
}

impl Modem {
    /// Object paths of the modem's bearers, resolved by
    /// [`Client::bearers`](super::Client::bearers).
    pub fn bearer_paths(&self) -> &[OwnedObjectPath] {
        &self.bearers
    }
}

/// Decodes a modem's properties map.
///
/// Unknown keys are ignored.
///
/// # Errors
///
/// Returns `DecodeError::Field` naming the first property whose value has
/// the wrong shape.
pub fn decode_modem(index: u32, properties: &PropertyMap) -> Result<Modem, DecodeError> {
    let mut modem = Modem {
        index,
        ..Modem::default()
    };

    for (key, value) in properties {
        let mut vp = ValueParser::new(value);
        match key.as_str() {
            "Bearers" => modem.bearers = vp.object_paths(),
            "CarrierConfiguration" => modem.carrier_configuration = vp.string(),
            "CarrierConfigurationRevision" => modem.carrier_configuration_revision = vp.string(),
            "Device" => modem.device = vp.string(),
            "DeviceIdentifier" => modem.device_identifier = vp.string(),
            "EquipmentIdentifier" => modem.equipment_identifier = vp.string(),
            "HardwareRevision" => modem.hardware_revision = vp.string(),
            "Manufacturer" => modem.manufacturer = vp.string(),
            "Model" => modem.model = vp.string(),
            "Plugin" => modem.plugin = vp.string(),
            "Ports" => modem.ports = vp.ports(),
            "PowerState" => modem.power_state = PowerState::from(vp.int()),
            "PrimaryPort" => modem.primary_port = vp.string(),
            "Revision" => modem.revision = vp.string(),
            "State" => modem.state = ModemState::from(vp.int()),
            _ => {}
        }

        vp.finish().map_err(|err| DecodeError::field(key, err))?;
    }

    Ok(modem)
}

/// Normalizes the string returned by `Modem.Time.GetNetworkTime`.
///
/// Modems send an ISO 8601 time carrying a zone offset whose clock fields
/// are nonetheless UTC. The clock fields are read as UTC, with sub-second
/// precision dropped, and the result is shown in the string's own offset:
/// `2020-07-15T16:31:02-04:00` becomes `2020-07-15T12:31:02-04:00`.
///
/// This does not trust the offset-adjusted instant of the input. It looks
/// like a workaround for misbehaving modems; existing callers rely on it.
///
/// # Errors
///
/// Returns `DecodeError::InvalidTimestamp` if the string is not RFC 3339.
pub fn normalize_network_time(value: &str) -> Result<DateTime<FixedOffset>, DecodeError> {
    let parsed =
        DateTime::parse_from_rfc3339(value).map_err(|source| DecodeError::InvalidTimestamp {
            value: value.to_owned(),
            source,
        })?;

    let clock = parsed.naive_local();
    let clock = clock.with_nanosecond(0).unwrap_or(clock);

    Ok(Utc.from_utc_datetime(&clock).with_timezone(parsed.offset()))
}
