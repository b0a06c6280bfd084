//! Device-control port: reaching a physical dimmer.
//!
//! A [`DeviceConnector`] opens one short-lived [`DeviceConnection`] per
//! dispatch. The connection reports a [`DimmerCapability`] up front so the
//! caller can pick a control strategy at construction time instead of
//! probing the device type later.

use std::future::Future;
use std::sync::Arc;

use kasa_helper_domain::brightness::Brightness;
use kasa_helper_domain::config_entry::DeviceConfig;
use kasa_helper_domain::error::KasaHelperError;

/// How a connected device can be dimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimmerCapability {
    /// Legacy dimmer protocol: a direct "set brightness" call that leaves
    /// power untouched.
    LegacyDimmer,
    /// Modern protocol exposing a brightness module. Brightness is written
    /// through `set_device_info`, which also carries `device_on`.
    BrightnessModule,
    /// The device cannot be dimmed (plain plug, strip, camera, ...).
    Unsupported,
}

/// Snapshot returned by a `get_device_info` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_on: bool,
    pub brightness: Option<u8>,
}

/// An open connection to one physical device.
pub trait DeviceConnection: Send {
    /// Address the connection was opened against.
    fn host(&self) -> &str;

    /// Model string reported by the device, for diagnostics.
    fn model(&self) -> &str;

    /// Capability descriptor determined while connecting.
    fn capability(&self) -> DimmerCapability;

    /// Legacy dimmer call: set brightness only.
    fn set_brightness(
        &mut self,
        level: Brightness,
    ) -> impl Future<Output = Result<(), KasaHelperError>> + Send;

    /// Read the current device information.
    fn get_device_info(
        &mut self,
    ) -> impl Future<Output = Result<DeviceInfo, KasaHelperError>> + Send;

    /// Write brightness together with an explicit power state.
    fn set_device_info(
        &mut self,
        level: Brightness,
        device_on: bool,
    ) -> impl Future<Output = Result<(), KasaHelperError>> + Send;
}

/// Opens connections to physical devices.
pub trait DeviceConnector {
    type Connection: DeviceConnection;

    /// Connect to the device described by `config` and determine its capability.
    fn connect(
        &self,
        config: &DeviceConfig,
    ) -> impl Future<Output = Result<Self::Connection, KasaHelperError>> + Send;
}

impl<T: DeviceConnector + Send + Sync> DeviceConnector for Arc<T> {
    type Connection = T::Connection;

    fn connect(
        &self,
        config: &DeviceConfig,
    ) -> impl Future<Output = Result<Self::Connection, KasaHelperError>> + Send {
        (**self).connect(config)
    }
}
