//! Brightness control strategies, chosen once per connection.
//!
//! Both strategies expose the same operation: change brightness while
//! leaving the device's on/off state exactly as it was.

use std::future::Future;

use kasa_helper_domain::brightness::Brightness;
use kasa_helper_domain::error::{KasaHelperError, UnsupportedDeviceError};

use crate::ports::{DeviceConnection, DimmerCapability};

/// Sets brightness without toggling power.
pub trait PowerPreservingBrightness {
    fn set_brightness_preserving_power(
        &mut self,
        level: Brightness,
    ) -> impl Future<Output = Result<(), KasaHelperError>> + Send;
}

/// Legacy dimmers: their brightness call never touches power.
pub struct LegacyDimmer<C> {
    connection: C,
}

impl<C: DeviceConnection> PowerPreservingBrightness for LegacyDimmer<C> {
    async fn set_brightness_preserving_power(
        &mut self,
        level: Brightness,
    ) -> Result<(), KasaHelperError> {
        self.connection.set_brightness(level).await
    }
}

/// Modern devices with a brightness module.
///
/// Their write carries `device_on`, so the current value is read first and
/// written back unchanged.
pub struct BrightnessModuleDimmer<C> {
    connection: C,
}

impl<C: DeviceConnection> PowerPreservingBrightness for BrightnessModuleDimmer<C> {
    async fn set_brightness_preserving_power(
        &mut self,
        level: Brightness,
    ) -> Result<(), KasaHelperError> {
        let info = self.connection.get_device_info().await?;
        tracing::debug!(
            host = self.connection.host(),
            device_on = info.device_on,
            "preserving power state"
        );
        self.connection.set_device_info(level, info.device_on).await
    }
}

/// The strategy selected for one connection.
pub enum BrightnessControl<C> {
    Legacy(LegacyDimmer<C>),
    Module(BrightnessModuleDimmer<C>),
}

impl<C: DeviceConnection> BrightnessControl<C> {
    /// Pick the strategy matching the connection's capability descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedDeviceError`] when the device cannot be dimmed.
    pub fn from_connection(connection: C) -> Result<Self, UnsupportedDeviceError> {
        match connection.capability() {
            DimmerCapability::LegacyDimmer => Ok(Self::Legacy(LegacyDimmer { connection })),
            DimmerCapability::BrightnessModule => {
                Ok(Self::Module(BrightnessModuleDimmer { connection }))
            }
            DimmerCapability::Unsupported => Err(UnsupportedDeviceError {
                host: connection.host().to_string(),
                model: connection.model().to_string(),
            }),
        }
    }
}

impl<C: DeviceConnection> PowerPreservingBrightness for BrightnessControl<C> {
    async fn set_brightness_preserving_power(
        &mut self,
        level: Brightness,
    ) -> Result<(), KasaHelperError> {
        match self {
            Self::Legacy(dimmer) => dimmer.set_brightness_preserving_power(level).await,
            Self::Module(dimmer) => dimmer.set_brightness_preserving_power(level).await,
        }
    }
}
