use std::collections::HashMap;
use std::sync::Arc;

use kasa_helper_app::ports::{DeviceConnection, DeviceConnector, DeviceInfo, DimmerCapability};
use kasa_helper_domain::brightness::Brightness;
use kasa_helper_domain::config_entry::DeviceConfig;
use kasa_helper_domain::error::KasaHelperError;

use crate::config::{VirtualDeviceConfig, VirtualKind};
use crate::dimmer::{DimmerState, VirtualDimmer};
use crate::error::VirtualError;

/// Connects to simulated dimmers by host.
#[derive(Debug, Clone, Default)]
pub struct VirtualConnector {
    devices: HashMap<String, Arc<VirtualDimmer>>,
}

impl VirtualConnector {
    #[must_use]
    pub fn new(devices: &[VirtualDeviceConfig]) -> Self {
        let devices = devices
            .iter()
            .map(|config| (config.host.clone(), Arc::new(VirtualDimmer::new(config))))
            .collect();
        Self { devices }
    }

    /// Current state of the device at `host`.
    #[must_use]
    pub fn state(&self, host: &str) -> Option<DimmerState> {
        self.devices.get(host).map(|dimmer| dimmer.state())
    }
}

impl DeviceConnector for VirtualConnector {
    type Connection = VirtualConnection;

    async fn connect(&self, config: &DeviceConfig) -> Result<VirtualConnection, KasaHelperError> {
        let dimmer = self
            .devices
            .get(&config.host)
            .cloned()
            .ok_or_else(|| VirtualError::UnknownHost(config.host.clone()))?;
        tracing::debug!(host = dimmer.host(), model = dimmer.model(), "virtual device connected");
        Ok(VirtualConnection { dimmer })
    }
}

/// A connection to one simulated dimmer.
#[derive(Debug)]
pub struct VirtualConnection {
    dimmer: Arc<VirtualDimmer>,
}

impl VirtualConnection {
    fn require(&self, kind: VirtualKind, operation: &'static str) -> Result<(), VirtualError> {
        if self.dimmer.kind() == kind {
            Ok(())
        } else {
            Err(VirtualError::WrongKind {
                host: self.dimmer.host().to_string(),
                operation,
            })
        }
    }
}

impl DeviceConnection for VirtualConnection {
    fn host(&self) -> &str {
        self.dimmer.host()
    }

    fn model(&self) -> &str {
        self.dimmer.model()
    }

    fn capability(&self) -> DimmerCapability {
        self.dimmer.capability()
    }

    async fn set_brightness(&mut self, level: Brightness) -> Result<(), KasaHelperError> {
        self.require(VirtualKind::Legacy, "set_brightness")?;
        self.dimmer.set_brightness(level.non_zero_percent());
        Ok(())
    }

    async fn get_device_info(&mut self) -> Result<DeviceInfo, KasaHelperError> {
        let state = self.dimmer.state();
        Ok(DeviceInfo {
            device_on: state.device_on,
            brightness: Some(state.brightness),
        })
    }

    async fn set_device_info(
        &mut self,
        level: Brightness,
        device_on: bool,
    ) -> Result<(), KasaHelperError> {
        self.require(VirtualKind::Module, "set_device_info")?;
        self.dimmer
            .set_device_info(level.non_zero_percent(), device_on);
        Ok(())
    }
}
