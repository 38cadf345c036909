//! Closed representation of the D-Bus values ModemManager sends.

use std::collections::HashMap;

use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

use super::ModemError;

/// Properties of one interface keyed by property name, as returned by
/// `org.freedesktop.DBus.Properties.GetAll`.
pub type PropertyMap = HashMap<String, WireValue>;

/// An untyped value received from, or sent to, the daemon.
///
/// Arrays of any element type become [`WireValue::List`], D-Bus structs
/// become [`WireValue::Struct`], string-keyed dictionaries become
/// [`WireValue::Map`] and any other dictionary becomes [`WireValue::Dict`].
/// Nested variants are unwrapped on conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// `b`
    Bool(bool),
    /// `y`
    Byte(u8),
    /// `n`
    Int16(i16),
    /// `q`
    Uint16(u16),
    /// `i`
    Int32(i32),
    /// `u`
    Uint32(u32),
    /// `x`
    Int64(i64),
    /// `t`
    Uint64(u64),
    /// `d`
    Double(f64),
    /// `s`
    Str(String),
    /// `o`
    ObjectPath(OwnedObjectPath),
    /// Any D-Bus array.
    List(Vec<WireValue>),
    /// Any D-Bus struct, fields in order.
    Struct(Vec<WireValue>),
    /// A string-keyed dictionary of variants.
    Map(PropertyMap),
    /// A dictionary with non-string keys, e.g. `UnlockRetries` (`a{uu}`).
    Dict(Vec<(WireValue, WireValue)>),
}

impl WireValue {
    /// Short name of the value's runtime type, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::Int16(_) => "int16",
            Self::Uint16(_) => "uint16",
            Self::Int32(_) => "int32",
            Self::Uint32(_) => "uint32",
            Self::Int64(_) => "int64",
            Self::Uint64(_) => "uint64",
            Self::Double(_) => "double",
            Self::Str(_) => "string",
            Self::ObjectPath(_) => "object path",
            Self::List(_) => "list",
            Self::Struct(_) => "struct",
            Self::Map(_) => "properties map",
            Self::Dict(_) => "dict",
        }
    }

    /// Converts a method argument into a zvariant value.
    ///
    /// # Errors
    ///
    /// Returns `ModemError::UnsupportedArgument` for lists, structs and
    /// dictionaries, which no ModemManager method this crate calls accepts.
    pub fn to_value(&self) -> Result<Value<'static>, ModemError> {
        let value = match self {
            Self::Bool(v) => Value::from(*v),
            Self::Byte(v) => Value::from(*v),
            Self::Int16(v) => Value::from(*v),
            Self::Uint16(v) => Value::from(*v),
            Self::Int32(v) => Value::from(*v),
            Self::Uint32(v) => Value::from(*v),
            Self::Int64(v) => Value::from(*v),
            Self::Uint64(v) => Value::from(*v),
            Self::Double(v) => Value::from(*v),
            Self::Str(v) => Value::from(v.clone()),
            Self::ObjectPath(v) => Value::ObjectPath(v.clone().into_inner()),
            Self::List(_) | Self::Struct(_) | Self::Map(_) | Self::Dict(_) => {
                return Err(ModemError::UnsupportedArgument(self.kind()));
            }
        };

        Ok(value)
    }

    /// Builds a [`WireValue::Map`] when every key is a string.
    fn dict(entries: Vec<(WireValue, WireValue)>) -> Self {
        if !entries.iter().all(|(key, _)| matches!(key, Self::Str(_))) {
            return Self::Dict(entries);
        }

        Self::Map(
            entries
                .into_iter()
                .filter_map(|(key, value)| match key {
                    Self::Str(key) => Some((key, value)),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl TryFrom<&Value<'_>> for WireValue {
    type Error = ModemError;

    fn try_from(value: &Value<'_>) -> Result<Self, Self::Error> {
        let wire = match value {
            Value::Bool(v) => Self::Bool(*v),
            Value::U8(v) => Self::Byte(*v),
            Value::I16(v) => Self::Int16(*v),
            Value::U16(v) => Self::Uint16(*v),
            Value::I32(v) => Self::Int32(*v),
            Value::U32(v) => Self::Uint32(*v),
            Value::I64(v) => Self::Int64(*v),
            Value::U64(v) => Self::Uint64(*v),
            Value::F64(v) => Self::Double(*v),
            Value::Str(v) => Self::Str(v.as_str().to_owned()),
            Value::ObjectPath(v) => Self::ObjectPath(OwnedObjectPath::from(v.clone())),
            Value::Value(inner) => Self::try_from(&**inner)?,
            Value::Array(array) => Self::List(
                array
                    .iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Structure(structure) => Self::Struct(
                structure
                    .fields()
                    .iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Dict(dict) => Self::dict(
                dict.iter()
                    .map(|(key, value)| Ok((Self::try_from(key)?, Self::try_from(value)?)))
                    .collect::<Result<_, ModemError>>()?,
            ),
            other => {
                return Err(ModemError::UnsupportedValue(
                    other.value_signature().to_string(),
                ));
            }
        };

        Ok(wire)
    }
}

impl TryFrom<&OwnedValue> for WireValue {
    type Error = ModemError;

    fn try_from(value: &OwnedValue) -> Result<Self, Self::Error> {
        Self::try_from(&**value)
    }
}

/// Converts a `GetAll` reply into a [`PropertyMap`].
///
/// # Errors
///
/// Returns an error if any value has a D-Bus type with no [`WireValue`]
/// counterpart.
pub(crate) fn convert_map(map: &HashMap<String, OwnedValue>) -> Result<PropertyMap, ModemError> {
    map.iter()
        .map(|(key, value)| Ok((key.clone(), WireValue::try_from(value)?)))
        .collect()
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<u32> for WireValue {
    fn from(value: u32) -> Self {
        Self::Uint32(value)
    }
}

impl From<u64> for WireValue {
    fn from(value: u64) -> Self {
        Self::Uint64(value)
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<OwnedObjectPath> for WireValue {
    fn from(value: OwnedObjectPath) -> Self {
        Self::ObjectPath(value)
    }
}

impl From<PropertyMap> for WireValue {
    fn from(value: PropertyMap) -> Self {
        Self::Map(value)
    }
}
