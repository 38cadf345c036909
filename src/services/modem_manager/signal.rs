//! Extended signal quality decoding.

use std::time::Duration;

use super::{DecodeError, parser::ValueParser, value::PropertyMap};

/// Extended signal quality information, from the
/// `org.freedesktop.ModemManager1.Modem.Signal` interface.
///
/// A technology whose values are all zero had no data in the last refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal {
    /// Refresh rate of the extended signal data; zero when disabled.
    pub rate: Duration,
    /// CDMA1x signal.
    pub cdma: CdmaSignal,
    /// CDMA EV-DO signal.
    pub evdo: EvdoSignal,
    /// GSM/GPRS signal.
    pub gsm: GsmSignal,
    /// UMTS (WCDMA) signal.
    pub umts: UmtsSignal,
    /// LTE signal.
    pub lte: LteSignal,
    /// 5G NR signal.
    pub nr5g: Nr5gSignal,
}

/// CDMA1x signal values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CdmaSignal {
    /// Received signal strength indication, dBm.
    pub rssi: f64,
    /// Ec/Io, dBm.
    pub ecio: f64,
}

/// CDMA EV-DO signal values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvdoSignal {
    /// Received signal strength indication, dBm.
    pub rssi: f64,
    /// Ec/Io, dBm.
    pub ecio: f64,
    /// Signal to interference and noise ratio, dB.
    pub sinr: f64,
    /// Io, dBm.
    pub io: f64,
}

/// GSM signal values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GsmSignal {
    /// Received signal strength indication, dBm.
    pub rssi: f64,
}

/// UMTS signal values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UmtsSignal {
    /// Received signal strength indication, dBm.
    pub rssi: f64,
    /// Received signal code power, dBm.
    pub rscp: f64,
    /// Ec/Io, dBm.
    pub ecio: f64,
}

/// LTE signal values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LteSignal {
    /// Reference signal received power, dBm.
    pub rsrp: f64,
    /// Reference signal received quality, dB.
    pub rsrq: f64,
    /// Received signal strength indication, dBm.
    pub rssi: f64,
    /// Signal to noise ratio, dB.
    pub snr: f64,
}

/// 5G NR signal values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Nr5gSignal {
    /// Reference signal received power, dBm.
    pub rsrp: f64,
    /// Reference signal received quality, dB.
    pub rsrq: f64,
    /// Signal to noise ratio, dB.
    pub snr: f64,
}

/// Per-technology structures whose fields are all doubles keyed by name.
trait Metrics: Default {
    fn slot(&mut self, key: &str) -> Option<&mut f64>;
}

impl Metrics for CdmaSignal {
    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "rssi" => Some(&mut self.rssi),
            "ecio" => Some(&mut self.ecio),
            _ => None,
        }
    }
}

impl Metrics for EvdoSignal {
    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "rssi" => Some(&mut self.rssi),
            "ecio" => Some(&mut self.ecio),
            "sinr" => Some(&mut self.sinr),
            "io" => Some(&mut self.io),
            _ => None,
        }
    }
}

impl Metrics for GsmSignal {
    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "rssi" => Some(&mut self.rssi),
            _ => None,
        }
    }
}

impl Metrics for UmtsSignal {
    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "rssi" => Some(&mut self.rssi),
            "rscp" => Some(&mut self.rscp),
            "ecio" => Some(&mut self.ecio),
            _ => None,
        }
    }
}

impl Metrics for LteSignal {
    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "rsrp" => Some(&mut self.rsrp),
            "rsrq" => Some(&mut self.rsrq),
            "rssi" => Some(&mut self.rssi),
            "snr" => Some(&mut self.snr),
            _ => None,
        }
    }
}

impl Metrics for Nr5gSignal {
    fn slot(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "rsrp" => Some(&mut self.rsrp),
            "rsrq" => Some(&mut self.rsrq),
            "snr" => Some(&mut self.snr),
            _ => None,
        }
    }
}

/// Decodes the signal interface's properties map.
///
/// Unknown keys, including technologies this crate does not model, are
/// ignored.
///
/// # Errors
///
/// Returns `DecodeError::Field` naming the first property, or nested
/// technology key, whose value has the wrong shape.
pub fn decode_signal(properties: &PropertyMap) -> Result<Signal, DecodeError> {
    let mut signal = Signal::default();

    for (key, value) in properties {
        let mut vp = ValueParser::new(value);
        let nested = match key.as_str() {
            "Rate" => {
                signal.rate = vp.duration_secs();
                Ok(())
            }
            "Cdma" => decode_metrics(&vp.properties()).map(|m| signal.cdma = m),
            "Evdo" => decode_metrics(&vp.properties()).map(|m| signal.evdo = m),
            "Gsm" => decode_metrics(&vp.properties()).map(|m| signal.gsm = m),
            "Umts" => decode_metrics(&vp.properties()).map(|m| signal.umts = m),
            "Lte" => decode_metrics(&vp.properties()).map(|m| signal.lte = m),
            "Nr5g" => decode_metrics(&vp.properties()).map(|m| signal.nr5g = m),
            _ => Ok(()),
        };

        vp.finish()
            .and(nested)
            .map_err(|err| DecodeError::field(key, err))?;
    }

    Ok(signal)
}

fn decode_metrics<T: Metrics>(properties: &PropertyMap) -> Result<T, DecodeError> {
    let mut metrics = T::default();

    for (key, value) in properties {
        let mut vp = ValueParser::new(value);
        if let Some(slot) = metrics.slot(key) {
            *slot = vp.float64();
        }

        vp.finish().map_err(|err| DecodeError::field(key, err))?;
    }

    Ok(metrics)
}
