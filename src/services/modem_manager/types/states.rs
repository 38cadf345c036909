//! ModemManager state types.
//!
//! Values are taken from the ModemManager flags and enumerations reference.

crate::wire_enum! {
    /// Power state of a modem (`MMModemPowerState`).
    pub enum PowerState {
        /// Unknown power state.
        Unknown = 0,
        /// Off.
        Off = 1,
        /// Low-power mode.
        Low = 2,
        /// Full power mode.
        On = 3,
    }
}

crate::wire_enum! {
    /// Overall state of a modem (`MMModemState`).
    pub enum ModemState {
        /// The modem is unusable.
        Failed = -1,
        /// State unknown or not reportable.
        Unknown = 0,
        /// The modem is currently being initialized.
        Initializing = 1,
        /// The modem needs to be unlocked.
        Locked = 2,
        /// The modem is not enabled and is powered down.
        Disabled = 3,
        /// The modem is currently transitioning to the disabled state.
        Disabling = 4,
        /// The modem is currently transitioning to the enabled state.
        Enabling = 5,
        /// The modem is enabled and powered on but not registered with a network
        /// provider and not available for data connections.
        Enabled = 6,
        /// The modem is searching for a network provider to register with.
        Searching = 7,
        /// The modem is registered with a network provider, and data connections
        /// and messaging may be available for use.
        Registered = 8,
        /// The modem is disconnecting and deactivating the last active packet
        /// data bearer.
        Disconnecting = 9,
        /// The modem is activating and connecting the first packet data bearer.
        Connecting = 10,
        /// One or more packet data bearers is active and connected.
        Connected = 11,
    }
}

crate::wire_enum! {
    /// Method a bearer must use to obtain IP configuration (`MMBearerIpMethod`).
    pub enum BearerIpMethod {
        /// Unknown method.
        Unknown = 0,
        /// Use PPP to get IP addresses and DNS information.
        Ppp = 1,
        /// Use the provided static IP configuration.
        Static = 2,
        /// Begin DHCP or IPv6 SLAAC on the data interface.
        Dhcp = 3,
    }
}
