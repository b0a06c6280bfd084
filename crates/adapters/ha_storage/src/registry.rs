use std::sync::Arc;

use kasa_helper_app::ports::{AreaRegistry, ConfigEntryStore, DeviceRegistry, EntityRegistry};
use kasa_helper_domain::area::Area;
use kasa_helper_domain::config_entry::ConfigEntry;
use kasa_helper_domain::device::Device;
use kasa_helper_domain::entity::Entity;
use kasa_helper_domain::error::KasaHelperError;
use kasa_helper_domain::id::{AreaId, ConfigEntryId, DeviceId, FloorId, LabelId};

use crate::snapshot::RegistrySnapshot;

/// Registry lookups over a loaded [`RegistrySnapshot`].
///
/// Cloning is cheap; all clones share the same snapshot.
#[derive(Debug, Clone)]
pub struct HaRegistry {
    snapshot: Arc<RegistrySnapshot>,
}

impl HaRegistry {
    pub fn new(snapshot: RegistrySnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn snapshot(&self) -> &RegistrySnapshot {
        &self.snapshot
    }
}

fn select<T: Clone>(items: &[T], predicate: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| predicate(item)).cloned().collect()
}

impl AreaRegistry for HaRegistry {
    async fn get_area(&self, id: &AreaId) -> Result<Option<Area>, KasaHelperError> {
        Ok(self.snapshot.areas.iter().find(|a| &a.id == id).cloned())
    }

    async fn areas_for_label(&self, label: &LabelId) -> Result<Vec<Area>, KasaHelperError> {
        Ok(select(&self.snapshot.areas, |a| a.has_label(label)))
    }

    async fn areas_for_floor(&self, floor: &FloorId) -> Result<Vec<Area>, KasaHelperError> {
        Ok(select(&self.snapshot.areas, |a| a.is_on_floor(floor)))
    }
}

impl DeviceRegistry for HaRegistry {
    async fn get_device(&self, id: &DeviceId) -> Result<Option<Device>, KasaHelperError> {
        Ok(self.snapshot.devices.iter().find(|d| &d.id == id).cloned())
    }

    async fn devices_for_label(&self, label: &LabelId) -> Result<Vec<Device>, KasaHelperError> {
        Ok(select(&self.snapshot.devices, |d| d.has_label(label)))
    }

    async fn devices_for_area(&self, area: &AreaId) -> Result<Vec<Device>, KasaHelperError> {
        Ok(select(&self.snapshot.devices, |d| d.is_in_area(area)))
    }
}

impl EntityRegistry for HaRegistry {
    async fn get_entity(&self, entity_id: &str) -> Result<Option<Entity>, KasaHelperError> {
        Ok(self
            .snapshot
            .entities
            .iter()
            .find(|e| e.entity_id == entity_id || e.id.as_str() == entity_id)
            .cloned())
    }

    async fn entities_for_label(&self, label: &LabelId) -> Result<Vec<Entity>, KasaHelperError> {
        Ok(select(&self.snapshot.entities, |e| e.has_label(label)))
    }

    async fn entities_for_area(&self, area: &AreaId) -> Result<Vec<Entity>, KasaHelperError> {
        Ok(select(&self.snapshot.entities, |e| e.is_in_area(area)))
    }

    async fn entities_for_device(
        &self,
        device: &DeviceId,
    ) -> Result<Vec<Entity>, KasaHelperError> {
        Ok(select(&self.snapshot.entities, |e| e.belongs_to(device)))
    }
}

impl ConfigEntryStore for HaRegistry {
    async fn get_entry(&self, id: &ConfigEntryId) -> Result<Option<ConfigEntry>, KasaHelperError> {
        Ok(self
            .snapshot
            .entries
            .iter()
            .find(|e| &e.entry_id == id)
            .cloned())
    }
}
