//! Typed accessors over a single wire value.

use std::{net::IpAddr, time::Duration};

use zbus::zvariant::OwnedObjectPath;

use super::{
    DecodeError,
    types::{IpFamily, IpMask, Port, PortType},
    value::{PropertyMap, WireValue},
};

/// A decode session over one wire value.
///
/// Each accessor returns the requested type, or that type's zero value when
/// the wire value has a different shape. The first failure is kept and every
/// later accessor becomes a no-op, so callers run their accessors and then
/// check [`ValueParser::finish`] once.
#[derive(Debug)]
pub struct ValueParser<'a> {
    value: &'a WireValue,
    err: Option<DecodeError>,
}

impl<'a> ValueParser<'a> {
    /// Starts a session over `value`.
    pub fn new(value: &'a WireValue) -> Self {
        Self { value, err: None }
    }

    /// The first error recorded by this session, if any.
    pub fn err(&self) -> Option<&DecodeError> {
        self.err.as_ref()
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded by any accessor.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn extract<T: Default>(
        &mut self,
        decode: impl FnOnce(&'a WireValue) -> Result<T, DecodeError>,
    ) -> T {
        if self.err.is_some() {
            return T::default();
        }

        decode(self.value).unwrap_or_else(|err| {
            self.err = Some(err);
            T::default()
        })
    }

    /// Parses the value as a boolean.
    pub fn bool(&mut self) -> bool {
        self.extract(|value| match value {
            WireValue::Bool(v) => Ok(*v),
            other => Err(mismatch("bool", other)),
        })
    }

    /// Parses the value as a double.
    pub fn float64(&mut self) -> f64 {
        self.extract(|value| match value {
            WireValue::Double(v) => Ok(*v),
            other => Err(mismatch("double", other)),
        })
    }

    /// Parses an `int32` or `uint32` value as a signed integer.
    pub fn int(&mut self) -> i64 {
        self.extract(|value| match value {
            WireValue::Int32(v) => Ok(i64::from(*v)),
            WireValue::Uint32(v) => Ok(i64::from(*v)),
            other => Err(mismatch("int32 or uint32", other)),
        })
    }

    /// Parses the value as a `uint32`.
    pub fn uint32(&mut self) -> u32 {
        self.extract(|value| match value {
            WireValue::Uint32(v) => Ok(*v),
            other => Err(mismatch("uint32", other)),
        })
    }

    /// Parses the value as a `uint64`.
    pub fn uint64(&mut self) -> u64 {
        self.extract(|value| match value {
            WireValue::Uint64(v) => Ok(*v),
            other => Err(mismatch("uint64", other)),
        })
    }

    /// Parses the value as a string.
    pub fn string(&mut self) -> String {
        self.extract(|value| match value {
            WireValue::Str(v) => Ok(v.clone()),
            other => Err(mismatch("string", other)),
        })
    }

    /// Parses an `int32` or `uint32` number of seconds as a duration.
    pub fn duration_secs(&mut self) -> Duration {
        self.extract(|value| match value {
            WireValue::Uint32(v) => Ok(Duration::from_secs(u64::from(*v))),
            WireValue::Int32(v) => u64::try_from(*v)
                .map(Duration::from_secs)
                .map_err(|_| DecodeError::InvalidDuration(i64::from(*v))),
            other => Err(mismatch("int32 or uint32", other)),
        })
    }

    /// Parses a string value as an IPv4 or IPv6 address.
    pub fn ip(&mut self) -> Option<IpAddr> {
        self.extract(|value| match value {
            WireValue::Str(s) => s.parse().map(Some).map_err(|source| DecodeError::InvalidIp {
                value: s.clone(),
                source,
            }),
            other => Err(mismatch("string", other)),
        })
    }

    /// Parses a `uint32` prefix length as a network mask for `family`.
    pub fn mask(&mut self, family: IpFamily) -> Option<IpMask> {
        self.extract(|value| match value {
            WireValue::Uint32(prefix) => u8::try_from(*prefix)
                .ok()
                .and_then(|p| IpMask::new(p, family))
                .map(Some)
                .ok_or(DecodeError::InvalidPrefix {
                    prefix: *prefix,
                    bits: family.bits(),
                }),
            other => Err(mismatch("uint32", other)),
        })
    }

    /// Parses the value as a list of object paths.
    pub fn object_paths(&mut self) -> Vec<OwnedObjectPath> {
        self.extract(|value| match value {
            WireValue::List(items) => items
                .iter()
                .map(|item| match item {
                    WireValue::ObjectPath(path) => Ok(path.clone()),
                    other => Err(mismatch("object path list", other)),
                })
                .collect(),
            other => Err(mismatch("object path list", other)),
        })
    }

    /// Parses the value as a list of `(name, type)` port tuples.
    ///
    /// Any malformed entry fails the whole list.
    pub fn ports(&mut self) -> Vec<Port> {
        self.extract(|value| match value {
            WireValue::List(items) => items.iter().map(port).collect(),
            other => Err(mismatch("ports list", other)),
        })
    }

    /// Parses the value as a nested properties map.
    pub fn properties(&mut self) -> PropertyMap {
        self.extract(|value| match value {
            WireValue::Map(map) => Ok(map.clone()),
            other => Err(mismatch("properties map", other)),
        })
    }
}

fn port(entry: &WireValue) -> Result<Port, DecodeError> {
    let WireValue::Struct(fields) = entry else {
        return Err(DecodeError::MalformedPorts("entry is not a tuple"));
    };

    match fields.as_slice() {
        [WireValue::Str(name), WireValue::Uint32(port_type)] => Ok(Port {
            name: name.clone(),
            port_type: PortType::from(i64::from(*port_type)),
        }),
        [_, _] => Err(DecodeError::MalformedPorts(
            "entry is not a (string, uint32) pair",
        )),
        _ => Err(DecodeError::MalformedPorts("entry does not have two fields")),
    }
}

fn mismatch(expected: &'static str, found: &WireValue) -> DecodeError {
    DecodeError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}
