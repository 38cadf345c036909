use std::{
    net::{IpAddr, Ipv4Addr},
    time::Duration,
};

use zbus::zvariant::OwnedObjectPath;

use super::{port, props};
use crate::services::modem_manager::{DecodeError, IpFamily, PortType, ValueParser, WireValue};

#[test]
fn mismatch_returns_zero_and_records_error() {
    let value = WireValue::from("not a number");
    let mut vp = ValueParser::new(&value);

    assert_eq!(vp.uint32(), 0);
    assert!(matches!(
        vp.err(),
        Some(DecodeError::TypeMismatch {
            expected: "uint32",
            found: "string"
        })
    ));
}

#[test]
fn first_error_is_sticky() {
    let value = WireValue::from(true);
    let mut vp = ValueParser::new(&value);

    assert_eq!(vp.float64(), 0.0);
    // Would succeed on its own, but the session has already failed.
    assert!(!vp.bool());
    assert_eq!(vp.string(), "");

    match vp.finish() {
        Err(DecodeError::TypeMismatch { expected, found }) => {
            assert_eq!(expected, "double");
            assert_eq!(found, "bool");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn accessors_succeed_on_matching_types() {
    let cases = [
        WireValue::from(true),
        WireValue::from(-3.5),
        WireValue::from(7_u32),
        WireValue::from(9_u64),
        WireValue::from("wwan0"),
    ];

    let mut vp = ValueParser::new(&cases[0]);
    assert!(vp.bool());
    vp.finish().unwrap();

    let mut vp = ValueParser::new(&cases[1]);
    assert_eq!(vp.float64(), -3.5);
    vp.finish().unwrap();

    let mut vp = ValueParser::new(&cases[2]);
    assert_eq!(vp.uint32(), 7);
    vp.finish().unwrap();

    let mut vp = ValueParser::new(&cases[3]);
    assert_eq!(vp.uint64(), 9);
    vp.finish().unwrap();

    let mut vp = ValueParser::new(&cases[4]);
    assert_eq!(vp.string(), "wwan0");
    vp.finish().unwrap();
}

#[test]
fn int_accepts_both_32_bit_widths() {
    let signed = WireValue::from(-1_i32);
    let mut vp = ValueParser::new(&signed);
    assert_eq!(vp.int(), -1);
    vp.finish().unwrap();

    let unsigned = WireValue::from(u32::MAX);
    let mut vp = ValueParser::new(&unsigned);
    assert_eq!(vp.int(), i64::from(u32::MAX));
    vp.finish().unwrap();
}

#[test]
fn duration_rejects_negative_seconds() {
    let value = WireValue::from(20_u32);
    let mut vp = ValueParser::new(&value);
    assert_eq!(vp.duration_secs(), Duration::from_secs(20));
    vp.finish().unwrap();

    let value = WireValue::from(-5_i32);
    let mut vp = ValueParser::new(&value);
    assert_eq!(vp.duration_secs(), Duration::ZERO);
    assert!(matches!(vp.finish(), Err(DecodeError::InvalidDuration(-5))));
}

#[test]
fn ip_parses_both_families() {
    let value = WireValue::from("192.0.2.10");
    let mut vp = ValueParser::new(&value);
    assert_eq!(vp.ip(), Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10))));
    vp.finish().unwrap();

    let value = WireValue::from("2001:db8::1");
    let mut vp = ValueParser::new(&value);
    assert_eq!(vp.ip(), Some("2001:db8::1".parse().unwrap()));
    vp.finish().unwrap();
}

#[test]
fn ip_rejects_garbage() {
    let value = WireValue::from("192.0.2");
    let mut vp = ValueParser::new(&value);

    assert_eq!(vp.ip(), None);
    match vp.finish() {
        Err(DecodeError::InvalidIp { value, .. }) => assert_eq!(value, "192.0.2"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn mask_checks_family_width() {
    let value = WireValue::from(24_u32);
    let mut vp = ValueParser::new(&value);
    let mask = vp.mask(IpFamily::V4).unwrap();
    vp.finish().unwrap();
    assert_eq!(mask.prefix(), 24);
    assert_eq!(mask.netmask(), IpAddr::V4(Ipv4Addr::new(255, 255, 255, 0)));

    let value = WireValue::from(64_u32);
    let mut vp = ValueParser::new(&value);
    assert_eq!(vp.mask(IpFamily::V4), None);
    assert!(matches!(
        vp.finish(),
        Err(DecodeError::InvalidPrefix {
            prefix: 64,
            bits: 32
        })
    ));

    let mut vp = ValueParser::new(&value);
    let netmask: IpAddr = "ffff:ffff:ffff:ffff::".parse().unwrap();
    assert_eq!(vp.mask(IpFamily::V6).unwrap().netmask(), netmask);
    vp.finish().unwrap();
}

#[test]
fn ports_keep_wire_order() {
    let value = WireValue::List(vec![port("cdc-wdm0", 7), port("ttyUSB0", 4)]);
    let mut vp = ValueParser::new(&value);

    let ports = vp.ports();
    vp.finish().unwrap();

    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].name, "cdc-wdm0");
    assert_eq!(ports[0].port_type, PortType::Mbim);
    assert_eq!(ports[1].name, "ttyUSB0");
    assert_eq!(ports[1].port_type, PortType::Qcdm);
}

#[test]
fn ports_are_decoded_atomically() {
    let value = WireValue::List(vec![
        port("cdc-wdm0", 7),
        WireValue::Struct(vec![WireValue::from("ttyUSB0"), WireValue::from("qcdm")]),
    ]);
    let mut vp = ValueParser::new(&value);

    assert!(vp.ports().is_empty());
    assert!(matches!(vp.finish(), Err(DecodeError::MalformedPorts(_))));
}

#[test]
fn ports_reject_short_tuples() {
    let value = WireValue::List(vec![WireValue::Struct(vec![WireValue::from("ttyUSB0")])]);
    let mut vp = ValueParser::new(&value);

    assert!(vp.ports().is_empty());
    assert!(vp.err().is_some());
}

#[test]
fn object_paths_require_every_item_to_be_a_path() {
    let path = OwnedObjectPath::try_from("/org/freedesktop/ModemManager1/Bearer/0").unwrap();

    let value = WireValue::List(vec![WireValue::from(path.clone())]);
    let mut vp = ValueParser::new(&value);
    assert_eq!(vp.object_paths(), vec![path.clone()]);
    vp.finish().unwrap();

    let value = WireValue::List(vec![WireValue::from(path), WireValue::from("/not/a/path")]);
    let mut vp = ValueParser::new(&value);
    assert!(vp.object_paths().is_empty());
    assert!(vp.finish().is_err());
}

#[test]
fn properties_clone_nested_map() {
    let nested = props([("rssi", WireValue::from(-83.0))]);
    let value = WireValue::from(nested.clone());
    let mut vp = ValueParser::new(&value);

    assert_eq!(vp.properties(), nested);
    vp.finish().unwrap();

    let value = WireValue::from(1_u32);
    let mut vp = ValueParser::new(&value);
    assert!(vp.properties().is_empty());
    assert!(vp.finish().is_err());
}
