use std::time::Duration;

use crate::services::modem_manager::{
    DecodeError, ErrorCategory, ModemError, names, to_not_found, to_permission,
};

fn remote(name: &str) -> ModemError {
    ModemError::Remote {
        name: name.to_owned(),
        message: String::from("test"),
    }
}

#[test]
fn service_unknown_maps_to_not_found() {
    let err = to_not_found(remote(names::SERVICE_UNKNOWN), names::SERVICE_UNKNOWN);

    assert!(err.is(ErrorCategory::NotFound));
    assert!(!err.is(ErrorCategory::PermissionDenied));
    assert_eq!(err.remote_name(), Some(names::SERVICE_UNKNOWN));
}

#[test]
fn unknown_method_maps_to_not_found_through_context() {
    let err = ModemError::GetAllProperties {
        interface: String::from("org.freedesktop.ModemManager1.Modem"),
        source: Box::new(remote(names::UNKNOWN_METHOD)),
    };

    let err = to_not_found(err, names::UNKNOWN_METHOD);

    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert!(err.to_string().contains("org.freedesktop.ModemManager1.Modem"));
}

#[test]
fn unauthorized_maps_to_permission_denied() {
    let err = ModemError::CallFailed {
        method: String::from("org.freedesktop.ModemManager1.Modem.Signal.Setup"),
        source: Box::new(remote(names::UNAUTHORIZED)),
    };

    let err = to_permission(err);

    assert!(err.is(ErrorCategory::PermissionDenied));
    assert!(!err.is(ErrorCategory::NotFound));
}

#[test]
fn other_names_are_returned_unchanged() {
    let name = "org.freedesktop.ModemManager1.Error.Core.Failed";

    let err = to_permission(to_not_found(remote(name), names::UNKNOWN_METHOD));

    assert!(matches!(err, ModemError::Remote { ref name, .. } if name.ends_with("Core.Failed")));
    assert_eq!(err.category(), ErrorCategory::Other);
    assert!(!err.is(ErrorCategory::NotFound));
    assert!(!err.is(ErrorCategory::PermissionDenied));
}

#[test]
fn not_found_requires_the_requested_name() {
    let err = to_not_found(remote(names::SERVICE_UNKNOWN), names::UNKNOWN_METHOD);

    assert_eq!(err.category(), ErrorCategory::Other);
}

#[test]
fn unnamed_errors_are_returned_unchanged() {
    let err = to_permission(ModemError::Timeout(Duration::from_secs(1)));
    assert!(matches!(err, ModemError::Timeout(_)));
    assert_eq!(err.remote_name(), None);

    let err = to_not_found(
        ModemError::from(DecodeError::MissingValue("GetNetworkTime")),
        names::SERVICE_UNKNOWN,
    );
    assert!(matches!(err, ModemError::Decode(_)));
    assert_eq!(err.category(), ErrorCategory::Other);
}

#[test]
fn plain_bus_errors_have_no_name() {
    let err = ModemError::DbusError(zbus::Error::Failure(String::from("broken pipe")));
    assert_eq!(err.remote_name(), None);
}

#[test]
fn decode_field_wraps_source() {
    let err = DecodeError::field("Rate", DecodeError::InvalidDuration(-1));

    assert_eq!(err.to_string(), "error parsing \"Rate\": invalid duration: -1 seconds");
}
