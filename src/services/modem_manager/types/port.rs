crate::wire_enum! {
    /// Type of a modem port (`MMModemPortType`).
    pub enum PortType {
        /// Unknown.
        Unknown = 1,
        /// Net port.
        Net = 2,
        /// AT port.
        At = 3,
        /// QCDM port.
        Qcdm = 4,
        /// GPS port.
        Gps = 5,
        /// QMI port.
        Qmi = 6,
        /// MBIM port.
        Mbim = 7,
        /// Audio port.
        Audio = 8,
    }
}

/// A port exposed by a modem.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Port {
    /// Kernel name of the port, e.g. `ttyUSB0` or `cdc-wdm0`.
    pub name: String,
    /// What the port is used for.
    pub port_type: PortType,
}
