//! ModemManager errors and their classification.

use std::{net::AddrParseError, num::ParseIntError, time::Duration};

/// Well-known D-Bus error names which map to an [`ErrorCategory`].
pub mod names {
    /// Returned when an object, such as a modem index, does not exist.
    pub const UNKNOWN_METHOD: &str = "org.freedesktop.DBus.Error.UnknownMethod";
    /// Returned when ModemManager is not running on the bus.
    pub const SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";
    /// Returned when the caller lacks privileges for a modem method.
    pub const UNAUTHORIZED: &str = "org.freedesktop.ModemManager1.Error.Core.Unauthorized";
}

/// Generic failure classes independent of the D-Bus error vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The service or object does not exist.
    NotFound,
    /// The caller is not allowed to perform the operation.
    PermissionDenied,
    /// Anything else.
    Other,
}

/// Failure to turn a wire value into a typed field.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The value's runtime type does not match the requested type
    #[error("value is not of type {expected}: found {found}")]
    TypeMismatch {
        /// Type the accessor requires.
        expected: &'static str,
        /// Type actually received.
        found: &'static str,
    },

    /// A string could not be parsed as an IP address
    #[error("invalid IP address: {value:?}")]
    InvalidIp {
        /// The offending string.
        value: String,
        /// Parser error.
        #[source]
        source: AddrParseError,
    },

    /// A prefix length does not fit the address family
    #[error("invalid prefix length {prefix} for a {bits}-bit mask")]
    InvalidPrefix {
        /// Received prefix length.
        prefix: u32,
        /// Width of the address family.
        bits: u8,
    },

    /// A number of seconds was negative
    #[error("invalid duration: {0} seconds")]
    InvalidDuration(i64),

    /// A ports list entry does not have the `(name, type)` shape
    #[error("invalid ports list: {0}")]
    MalformedPorts(&'static str),

    /// A bearer object path does not end in a numeric index
    #[error("invalid bearer object path {path:?}: {source}")]
    BearerIndex {
        /// The bearer's object path.
        path: String,
        /// Parser error for the trailing segment.
        #[source]
        source: ParseIntError,
    },

    /// A timestamp string is not RFC 3339
    #[error("invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// The offending string.
        value: String,
        /// Parser error.
        #[source]
        source: chrono::ParseError,
    },

    /// A method that should return a value returned nothing
    #[error("no value returned by {0}")]
    MissingValue(&'static str),

    /// Decoding failed for a named property
    #[error("error parsing {key:?}: {source}")]
    Field {
        /// Property key being decoded.
        key: String,
        /// Underlying failure.
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wraps an error with the property key it was raised for.
    pub fn field(key: impl Into<String>, source: DecodeError) -> Self {
        Self::Field {
            key: key.into(),
            source: Box::new(source),
        }
    }
}

/// ModemManager service errors
#[derive(thiserror::Error, Debug)]
pub enum ModemError {
    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Variant conversion error
    #[error("D-Bus value conversion failed: {0}")]
    VariantError(#[from] zbus::zvariant::Error),

    /// Named error reply from the bus or the daemon
    #[error("{name}: {message}")]
    Remote {
        /// D-Bus error name, e.g. `org.freedesktop.DBus.Error.UnknownMethod`.
        name: String,
        /// Human readable detail supplied with the error.
        message: String,
    },

    /// Fetching a single property failed
    #[error("failed to get property {property:?} for {interface:?}: {source}")]
    GetProperty {
        /// Interface the property belongs to.
        interface: String,
        /// Property name.
        property: String,
        /// Underlying failure.
        #[source]
        source: Box<ModemError>,
    },

    /// Fetching all properties of an interface failed
    #[error("failed to get all properties for {interface:?}: {source}")]
    GetAllProperties {
        /// Interface being read.
        interface: String,
        /// Underlying failure.
        #[source]
        source: Box<ModemError>,
    },

    /// A method call failed
    #[error("failed to call {method:?}: {source}")]
    CallFailed {
        /// Fully qualified method name.
        method: String,
        /// Underlying failure.
        #[source]
        source: Box<ModemError>,
    },

    /// The service or object does not exist
    #[error("not found: {0}")]
    NotFound(#[source] Box<ModemError>),

    /// The caller lacks privileges for the operation
    #[error("permission denied: {0}")]
    PermissionDenied(#[source] Box<ModemError>),

    /// A reply could not be decoded
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The bus did not answer in time
    #[error("D-Bus call timed out after {0:?}")]
    Timeout(Duration),

    /// The bus sent a value type this crate does not model
    #[error("unsupported D-Bus value with signature {0:?}")]
    UnsupportedValue(String),

    /// A method argument cannot be sent
    #[error("unsupported method argument of type {0}")]
    UnsupportedArgument(&'static str),
}

impl ModemError {
    /// Returns the category added by [`to_not_found`] or [`to_permission`].
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::PermissionDenied(_) => ErrorCategory::PermissionDenied,
            _ => ErrorCategory::Other,
        }
    }

    /// Reports whether this error belongs to `category`.
    pub fn is(&self, category: ErrorCategory) -> bool {
        self.category() == category
    }

    /// Finds the D-Bus error name carried by this error or any error it wraps.
    pub fn remote_name(&self) -> Option<&str> {
        match self {
            Self::Remote { name, .. } => Some(name.as_str()),
            Self::DbusError(zbus::Error::MethodError(name, _, _)) => Some(name.as_str()),
            Self::GetProperty { source, .. }
            | Self::GetAllProperties { source, .. }
            | Self::CallFailed { source, .. }
            | Self::NotFound(source)
            | Self::PermissionDenied(source) => source.remote_name(),
            _ => None,
        }
    }
}

/// Classifies `err` as not found when its D-Bus error name equals `name`.
///
/// Callers pass the name that means "missing" in their context: a missing
/// modem index surfaces as [`names::UNKNOWN_METHOD`], an absent daemon as
/// [`names::SERVICE_UNKNOWN`]. Any other error is returned unchanged.
pub fn to_not_found(err: ModemError, name: &str) -> ModemError {
    if err.remote_name() == Some(name) {
        ModemError::NotFound(Box::new(err))
    } else {
        err
    }
}

/// Classifies `err` as permission denied when it carries
/// [`names::UNAUTHORIZED`]. Any other error is returned unchanged.
pub fn to_permission(err: ModemError) -> ModemError {
    if err.remote_name() == Some(names::UNAUTHORIZED) {
        ModemError::PermissionDenied(Box::new(err))
    } else {
        err
    }
}
