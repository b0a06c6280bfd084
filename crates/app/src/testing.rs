//! In-memory port fakes shared by the service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kasa_helper_domain::area::Area;
use kasa_helper_domain::brightness::Brightness;
use kasa_helper_domain::config_entry::{ConfigEntry, DeviceConfig};
use kasa_helper_domain::device::Device;
use kasa_helper_domain::entity::Entity;
use kasa_helper_domain::error::{KasaHelperError, NotFoundError};
use kasa_helper_domain::id::{AreaId, ConfigEntryId, DeviceId, FloorId, LabelId};

use crate::ports::{
    AreaRegistry, ConfigEntryStore, DeviceConnection, DeviceConnector, DeviceInfo,
    DeviceRegistry, DimmerCapability, EntityRegistry,
};

/// All four registries in one struct, backed by plain vectors.
#[derive(Default)]
pub struct InMemoryRegistry {
    pub areas: Vec<Area>,
    pub devices: Vec<Device>,
    pub entities: Vec<Entity>,
    pub entries: Vec<ConfigEntry>,
    pub fail_lookups: bool,
}

impl InMemoryRegistry {
    fn check(&self) -> Result<(), KasaHelperError> {
        if self.fail_lookups {
            return Err(KasaHelperError::Registry("registry offline".into()));
        }
        Ok(())
    }
}

impl AreaRegistry for InMemoryRegistry {
    async fn get_area(&self, id: &AreaId) -> Result<Option<Area>, KasaHelperError> {
        self.check()?;
        Ok(self.areas.iter().find(|a| &a.id == id).cloned())
    }

    async fn areas_for_label(&self, label: &LabelId) -> Result<Vec<Area>, KasaHelperError> {
        self.check()?;
        Ok(self.areas.iter().filter(|a| a.has_label(label)).cloned().collect())
    }

    async fn areas_for_floor(&self, floor: &FloorId) -> Result<Vec<Area>, KasaHelperError> {
        self.check()?;
        Ok(self.areas.iter().filter(|a| a.is_on_floor(floor)).cloned().collect())
    }
}

impl DeviceRegistry for InMemoryRegistry {
    async fn get_device(&self, id: &DeviceId) -> Result<Option<Device>, KasaHelperError> {
        self.check()?;
        Ok(self.devices.iter().find(|d| &d.id == id).cloned())
    }

    async fn devices_for_label(&self, label: &LabelId) -> Result<Vec<Device>, KasaHelperError> {
        self.check()?;
        Ok(self.devices.iter().filter(|d| d.has_label(label)).cloned().collect())
    }

    async fn devices_for_area(&self, area: &AreaId) -> Result<Vec<Device>, KasaHelperError> {
        self.check()?;
        Ok(self.devices.iter().filter(|d| d.is_in_area(area)).cloned().collect())
    }
}

impl EntityRegistry for InMemoryRegistry {
    async fn get_entity(&self, entity_id: &str) -> Result<Option<Entity>, KasaHelperError> {
        self.check()?;
        Ok(self
            .entities
            .iter()
            .find(|e| e.entity_id == entity_id || e.id.as_str() == entity_id)
            .cloned())
    }

    async fn entities_for_label(&self, label: &LabelId) -> Result<Vec<Entity>, KasaHelperError> {
        self.check()?;
        Ok(self.entities.iter().filter(|e| e.has_label(label)).cloned().collect())
    }

    async fn entities_for_area(&self, area: &AreaId) -> Result<Vec<Entity>, KasaHelperError> {
        self.check()?;
        Ok(self.entities.iter().filter(|e| e.is_in_area(area)).cloned().collect())
    }

    async fn entities_for_device(
        &self,
        device: &DeviceId,
    ) -> Result<Vec<Entity>, KasaHelperError> {
        self.check()?;
        Ok(self.entities.iter().filter(|e| e.belongs_to(device)).cloned().collect())
    }
}

impl ConfigEntryStore for InMemoryRegistry {
    async fn get_entry(&self, id: &ConfigEntryId) -> Result<Option<ConfigEntry>, KasaHelperError> {
        self.check()?;
        Ok(self.entries.iter().find(|e| &e.entry_id == id).cloned())
    }
}

/// State of one simulated device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeDevice {
    pub capability: DimmerCapability,
    pub model: String,
    pub device_on: bool,
    pub brightness: u8,
    pub fail_connect: bool,
}

impl FakeDevice {
    pub fn legacy(device_on: bool, brightness: u8) -> Self {
        Self {
            capability: DimmerCapability::LegacyDimmer,
            model: "HS220".to_string(),
            device_on,
            brightness,
            fail_connect: false,
        }
    }

    pub fn module(device_on: bool, brightness: u8) -> Self {
        Self {
            capability: DimmerCapability::BrightnessModule,
            model: "KS225".to_string(),
            device_on,
            brightness,
            fail_connect: false,
        }
    }

    pub fn unsupported() -> Self {
        Self {
            capability: DimmerCapability::Unsupported,
            model: "HS100".to_string(),
            device_on: true,
            brightness: 0,
            fail_connect: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Self::legacy(false, 0)
        }
    }
}

/// One call observed by the fake connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Connect { host: String },
    SetBrightness { host: String, level: u8 },
    GetDeviceInfo { host: String },
    SetDeviceInfo { host: String, level: u8, device_on: bool },
}

#[derive(Default)]
struct FakeState {
    devices: HashMap<String, FakeDevice>,
    calls: Vec<RecordedCall>,
}

/// Connector over a table of simulated devices keyed by host.
#[derive(Default, Clone)]
pub struct FakeConnector {
    state: Arc<Mutex<FakeState>>,
}

impl FakeConnector {
    pub fn with_device(self, host: &str, device: FakeDevice) -> Self {
        self.state
            .lock()
            .unwrap()
            .devices
            .insert(host.to_string(), device);
        self
    }

    pub fn device(&self, host: &str) -> FakeDevice {
        self.state.lock().unwrap().devices[host].clone()
    }

    /// Calls other than `Connect`, in the order they happened.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| !matches!(c, RecordedCall::Connect { .. }))
            .cloned()
            .collect()
    }

    /// Hosts a connection was attempted against, in order.
    pub fn connected_hosts(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter_map(|c| match c {
                RecordedCall::Connect { host } => Some(host.clone()),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeConnection {
    host: String,
    model: String,
    capability: DimmerCapability,
    state: Arc<Mutex<FakeState>>,
}

impl FakeConnection {
    fn record(&self, call: RecordedCall) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl DeviceConnector for FakeConnector {
    type Connection = FakeConnection;

    async fn connect(&self, config: &DeviceConfig) -> Result<FakeConnection, KasaHelperError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall::Connect {
            host: config.host.clone(),
        });
        let device = state.devices.get(&config.host).ok_or_else(|| NotFoundError {
            entity: "Device",
            id: config.host.clone(),
        })?;
        if device.fail_connect {
            return Err(KasaHelperError::Device("connection refused".into()));
        }
        Ok(FakeConnection {
            host: config.host.clone(),
            model: device.model.clone(),
            capability: device.capability,
            state: Arc::clone(&self.state),
        })
    }
}

impl DeviceConnection for FakeConnection {
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
        self.record(RecordedCall::SetBrightness {
            host: self.host.clone(),
            level: level.percent(),
        });
        if let Some(device) = self.state.lock().unwrap().devices.get_mut(&self.host) {
            device.brightness = level.percent();
        }
        Ok(())
    }

    async fn get_device_info(&mut self) -> Result<DeviceInfo, KasaHelperError> {
        self.record(RecordedCall::GetDeviceInfo {
            host: self.host.clone(),
        });
        let state = self.state.lock().unwrap();
        let device = &state.devices[&self.host];
        Ok(DeviceInfo {
            device_on: device.device_on,
            brightness: Some(device.brightness),
        })
    }

    async fn set_device_info(
        &mut self,
        level: Brightness,
        device_on: bool,
    ) -> Result<(), KasaHelperError> {
        self.record(RecordedCall::SetDeviceInfo {
            host: self.host.clone(),
            level: level.percent(),
            device_on,
        });
        if let Some(device) = self.state.lock().unwrap().devices.get_mut(&self.host) {
            device.brightness = level.percent();
            device.device_on = device_on;
        }
        Ok(())
    }
}
