//! Object paths and interface names under ModemManager's namespace.
//!
//! Every path and name this crate builds comes from fixed literals and
//! formatted integers, so a result that fails validation is a bug in the
//! caller and panics instead of returning an error.

use zbus::{
    names::{InterfaceName, MemberName},
    zvariant::{ObjectPath, OwnedObjectPath},
};

use super::DecodeError;

/// Well-known bus name of the daemon.
pub const SERVICE: &str = "org.freedesktop.ModemManager1";

/// Root object path of the daemon.
pub const BASE_OBJECT: &str = "/org/freedesktop/ModemManager1";

/// Builds an object path below [`BASE_OBJECT`].
///
/// `object_path(&["Modem", "0"])` yields `/org/freedesktop/ModemManager1/Modem/0`.
///
/// # Panics
///
/// Panics if the joined path is not a valid D-Bus object path.
#[allow(clippy::panic)]
pub fn object_path(segments: &[&str]) -> OwnedObjectPath {
    let path = segments
        .iter()
        .filter(|segment| !segment.is_empty())
        .fold(String::from(BASE_OBJECT), |mut path, segment| {
            path.push('/');
            path.push_str(segment);
            path
        });

    match OwnedObjectPath::try_from(path.as_str()) {
        Ok(path) => path,
        Err(err) => panic!("modemmanager: bad D-Bus object path {path:?}: {err}"),
    }
}

/// Builds an interface name below [`SERVICE`].
///
/// `interface_name(&["Modem", "Signal"])` yields
/// `org.freedesktop.ModemManager1.Modem.Signal`.
///
/// # Panics
///
/// Panics if the joined name is not a valid D-Bus interface name.
#[allow(clippy::panic)]
pub fn interface_name(segments: &[&str]) -> String {
    let name = join_name(segments);
    if let Err(err) = InterfaceName::try_from(name.as_str()) {
        panic!("modemmanager: bad D-Bus interface name {name:?}: {err}");
    }

    name
}

/// Builds a fully qualified method name below [`SERVICE`].
///
/// The last segment is the member; everything before it is the interface.
///
/// # Panics
///
/// Panics if either half is not a valid D-Bus name.
#[allow(clippy::panic)]
pub fn method_name(segments: &[&str]) -> String {
    let name = join_name(segments);
    let valid = name.rsplit_once('.').is_some_and(|(interface, member)| {
        InterfaceName::try_from(interface).is_ok() && MemberName::try_from(member).is_ok()
    });
    if !valid {
        panic!("modemmanager: bad D-Bus method name {name:?}");
    }

    name
}

fn join_name(segments: &[&str]) -> String {
    segments.iter().fold(String::from(SERVICE), |mut name, segment| {
        name.push('.');
        name.push_str(segment);
        name
    })
}

/// Parses a bearer's index from the last segment of its object path.
///
/// # Errors
///
/// Returns `DecodeError::BearerIndex` if the segment is not a number.
pub fn bearer_index(path: &ObjectPath<'_>) -> Result<u32, DecodeError> {
    let last = path.as_str().rsplit('/').next().unwrap_or_default();
    last.parse().map_err(|source| DecodeError::BearerIndex {
        path: path.to_string(),
        source,
    })
}
