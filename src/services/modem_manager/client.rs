//! High-level ModemManager client.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, instrument};

use super::{
    DecodeError, ModemError,
    bearer::{Bearer, decode_bearer},
    error::{names, to_not_found, to_permission},
    modem::{Modem, decode_modem, normalize_network_time},
    parser::ValueParser,
    paths::{interface_name, method_name, object_path},
    signal::{Signal, decode_signal},
    transport::{DbusTransport, Transport},
    value::WireValue,
};
use crate::config::ClientConfig;

/// Handle to ModemManager.
///
/// Cheap to clone; all clones share one transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    version: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Connects to ModemManager on the system bus.
    ///
    /// # Errors
    ///
    /// Returns an error whose category is
    /// [`ErrorCategory::NotFound`](super::ErrorCategory::NotFound) if
    /// ModemManager is not running, or any bus error encountered on the way.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ModemError> {
        let transport = DbusTransport::system(config.call_timeout()).await?;
        Self::with_transport(Arc::new(transport)).await
    }

    /// Builds a client over `transport` after checking that ModemManager
    /// answers by reading its version.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the bus reports the service as unknown,
    /// `ModemError::Decode` if the version is not a string, or the transport
    /// error unchanged.
    #[instrument(skip(transport), err)]
    pub async fn with_transport(transport: Arc<dyn Transport>) -> Result<Self, ModemError> {
        let value = transport
            .get_property(&object_path(&[]), &interface_name(&[]), "Version")
            .await
            .map_err(|err| to_not_found(err, names::SERVICE_UNKNOWN))?;

        let mut vp = ValueParser::new(&value);
        let version = vp.string();
        vp.finish()
            .map_err(|err| DecodeError::field("Version", err))?;

        info!(%version, "connected to ModemManager");
        Ok(Self { transport, version })
    }

    /// Version of the running ModemManager daemon.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fetches the modem at `index`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no modem exists at `index`, or
    /// `ModemError::Decode` if its properties are malformed.
    #[instrument(skip(self), err)]
    pub async fn modem(&self, index: u32) -> Result<Modem, ModemError> {
        let properties = self
            .transport
            .get_all_properties(&modem_path(index), &interface_name(&["Modem"]))
            .await
            .map_err(|err| to_not_found(err, names::UNKNOWN_METHOD))?;

        let modem = decode_modem(index, &properties)?;
        debug!(device = %modem.device, state = %modem.state, "decoded modem");
        Ok(modem)
    }

    /// Fetches extended signal quality information for `modem`.
    ///
    /// Values refresh at the rate configured by [`Client::signal_setup`].
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged or `ModemError::Decode`.
    #[instrument(skip(self, modem), fields(index = modem.index), err)]
    pub async fn signal(&self, modem: &Modem) -> Result<Signal, ModemError> {
        let properties = self
            .transport
            .get_all_properties(&modem_path(modem.index), &interface_name(&["Modem", "Signal"]))
            .await?;

        Ok(decode_signal(&properties)?)
    }

    /// Sets how often `modem` refreshes extended signal data.
    ///
    /// `rate` is rounded to the nearest second; zero disables refreshing.
    ///
    /// # Errors
    ///
    /// Returns a permission-denied error if the caller is not authorized, or
    /// the transport error unchanged.
    #[instrument(skip(self, modem), fields(index = modem.index), err)]
    pub async fn signal_setup(&self, modem: &Modem, rate: Duration) -> Result<(), ModemError> {
        let seconds = rate.saturating_add(Duration::from_millis(500)).as_secs();
        let seconds = u32::try_from(seconds).unwrap_or(u32::MAX);

        self.transport
            .call_method(
                &modem_path(modem.index),
                &method_name(&["Modem", "Signal", "Setup"]),
                &[WireValue::Uint32(seconds)],
            )
            .await
            .map_err(to_permission)?;

        debug!(seconds, "configured signal refresh rate");
        Ok(())
    }

    /// Reads the current time from `modem`'s network.
    ///
    /// See [`normalize_network_time`] for how the reply is interpreted.
    ///
    /// # Errors
    ///
    /// Returns a permission-denied error if the caller is not authorized,
    /// `ModemError::Decode` for a missing or malformed time string, or the
    /// transport error unchanged.
    #[instrument(skip(self, modem), fields(index = modem.index), err)]
    pub async fn network_time(&self, modem: &Modem) -> Result<DateTime<FixedOffset>, ModemError> {
        let value = self
            .transport
            .call_method(
                &modem_path(modem.index),
                &method_name(&["Modem", "Time", "GetNetworkTime"]),
                &[],
            )
            .await
            .map_err(to_permission)?
            .ok_or(DecodeError::MissingValue("GetNetworkTime"))?;

        let mut vp = ValueParser::new(&value);
        let time = vp.string();
        vp.finish()?;

        Ok(normalize_network_time(&time)?)
    }

    /// Fetches every bearer of `modem`.
    ///
    /// # Errors
    ///
    /// Returns the first transport error unchanged, or `ModemError::Decode`
    /// if a bearer path or its properties are malformed.
    #[instrument(skip(self, modem), fields(index = modem.index), err)]
    pub async fn bearers(&self, modem: &Modem) -> Result<Vec<Bearer>, ModemError> {
        let interface = interface_name(&["Bearer"]);
        let mut bearers = Vec::with_capacity(modem.bearer_paths().len());

        for path in modem.bearer_paths() {
            let properties = self
                .transport
                .get_all_properties(path, &interface)
                .await?;
            bearers.push(decode_bearer(path, &properties)?);
        }

        debug!(count = bearers.len(), "decoded bearers");
        Ok(bearers)
    }
}

fn modem_path(index: u32) -> zbus::zvariant::OwnedObjectPath {
    object_path(&["Modem", &index.to_string()])
}
