use kasa_helper_app::ports::{DeviceConnection, DeviceInfo, DimmerCapability};
use kasa_helper_domain::brightness::Brightness;
use kasa_helper_domain::error::KasaHelperError;
use serde::Deserialize;

use crate::error::KasaError;
use crate::iot::{self, SysInfo};
use crate::smart::{self, SmartDeviceInfo};
use crate::transport::Transport;

/// Request dialect, chosen from the device family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Protocol {
    Iot,
    Smart,
}

impl Protocol {
    fn name(self) -> &'static str {
        match self {
            Self::Iot => "IOT",
            Self::Smart => "SMART",
        }
    }
}

/// An open connection to one Kasa device.
pub struct KasaConnection {
    host: String,
    model: String,
    capability: DimmerCapability,
    protocol: Protocol,
    transport: Transport,
}

impl std::fmt::Debug for KasaConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KasaConnection")
            .field("host", &self.host)
            .field("model", &self.model)
            .field("capability", &self.capability)
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}

impl KasaConnection {
    /// Query the device once to learn its model and dimming capability.
    pub(crate) async fn open(
        mut transport: Transport,
        protocol: Protocol,
    ) -> Result<Self, KasaError> {
        let (model, capability) = match protocol {
            Protocol::Iot => {
                let sysinfo = SysInfo::from_response(&transport.send(&iot::get_sysinfo()).await?)?;
                let capability = sysinfo.capability();
                (sysinfo.model, capability)
            }
            Protocol::Smart => {
                let components = transport
                    .send(&smart::request(smart::COMPONENT_NEGO))
                    .await?;
                let capability =
                    smart::capability(smart::result(smart::COMPONENT_NEGO, components)?)?;
                let info = Self::smart_device_info(&mut transport).await?;
                (info.model, capability)
            }
        };

        let host = transport.host().to_string();
        tracing::debug!(%host, %model, ?capability, protocol = protocol.name(), "device connected");
        Ok(Self {
            host,
            model,
            capability,
            protocol,
            transport,
        })
    }

    async fn smart_device_info(transport: &mut Transport) -> Result<SmartDeviceInfo, KasaError> {
        let response = transport
            .send(&smart::request(smart::GET_DEVICE_INFO))
            .await?;
        let result = smart::result(smart::GET_DEVICE_INFO, response)?;
        Ok(SmartDeviceInfo::deserialize(result)?)
    }

    fn wrong_protocol(&self, operation: &'static str) -> KasaError {
        KasaError::WrongProtocol {
            operation,
            protocol: self.protocol.name(),
        }
    }
}

impl DeviceConnection for KasaConnection {
    fn host(&self) -> &str {
        &self.host
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn capability(&self) -> DimmerCapability {
        self.capability
    }

    async fn set_brightness(&mut self, level: Brightness) -> Result<(), KasaHelperError> {
        if self.protocol != Protocol::Iot {
            return Err(self.wrong_protocol("set_brightness").into());
        }
        let request = iot::set_brightness(level.non_zero_percent());
        let response = self.transport.send(&request).await?;
        iot::check_set_brightness(&response)?;
        Ok(())
    }

    async fn get_device_info(&mut self) -> Result<DeviceInfo, KasaHelperError> {
        match self.protocol {
            Protocol::Iot => {
                let response = self.transport.send(&iot::get_sysinfo()).await?;
                let sysinfo = SysInfo::from_response(&response)?;
                Ok(DeviceInfo {
                    device_on: sysinfo.is_on(),
                    brightness: sysinfo.brightness,
                })
            }
            Protocol::Smart => {
                let info = Self::smart_device_info(&mut self.transport).await?;
                Ok(DeviceInfo {
                    device_on: info.device_on,
                    brightness: info.brightness,
                })
            }
        }
    }

    async fn set_device_info(
        &mut self,
        level: Brightness,
        device_on: bool,
    ) -> Result<(), KasaHelperError> {
        if self.protocol != Protocol::Smart {
            return Err(self.wrong_protocol("set_device_info").into());
        }
        let request = smart::set_device_info(level.non_zero_percent(), device_on);
        let response = self.transport.send(&request).await?;
        smart::result(smart::SET_DEVICE_INFO, response)?;
        Ok(())
    }
}
