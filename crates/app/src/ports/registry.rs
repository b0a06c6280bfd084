//! Registry ports: read-only lookups into the host's registries.
//!
//! The host owns and mutates these records; this integration only reads
//! them. Every "for" lookup returns an empty list when nothing matches.

use std::future::Future;
use std::sync::Arc;

use kasa_helper_domain::area::Area;
use kasa_helper_domain::config_entry::ConfigEntry;
use kasa_helper_domain::device::Device;
use kasa_helper_domain::entity::Entity;
use kasa_helper_domain::error::KasaHelperError;
use kasa_helper_domain::id::{AreaId, ConfigEntryId, DeviceId, FloorId, LabelId};

/// Lookups into the host's area registry.
pub trait AreaRegistry {
    /// Get an area by id.
    fn get_area(
        &self,
        id: &AreaId,
    ) -> impl Future<Output = Result<Option<Area>, KasaHelperError>> + Send;

    /// All areas carrying `label`.
    fn areas_for_label(
        &self,
        label: &LabelId,
    ) -> impl Future<Output = Result<Vec<Area>, KasaHelperError>> + Send;

    /// All areas on `floor`.
    fn areas_for_floor(
        &self,
        floor: &FloorId,
    ) -> impl Future<Output = Result<Vec<Area>, KasaHelperError>> + Send;
}

/// Lookups into the host's device registry.
pub trait DeviceRegistry {
    /// Get a device by id.
    fn get_device(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, KasaHelperError>> + Send;

    /// All devices carrying `label`.
    fn devices_for_label(
        &self,
        label: &LabelId,
    ) -> impl Future<Output = Result<Vec<Device>, KasaHelperError>> + Send;

    /// All devices assigned to `area`.
    fn devices_for_area(
        &self,
        area: &AreaId,
    ) -> impl Future<Output = Result<Vec<Device>, KasaHelperError>> + Send;
}

/// Lookups into the host's entity registry.
pub trait EntityRegistry {
    /// Get an entity by its user-facing id (`light.kitchen`) or registry id.
    fn get_entity(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<Option<Entity>, KasaHelperError>> + Send;

    /// All entities carrying `label`.
    fn entities_for_label(
        &self,
        label: &LabelId,
    ) -> impl Future<Output = Result<Vec<Entity>, KasaHelperError>> + Send;

    /// All entities directly assigned to `area`.
    fn entities_for_area(
        &self,
        area: &AreaId,
    ) -> impl Future<Output = Result<Vec<Entity>, KasaHelperError>> + Send;

    /// All entities belonging to `device`.
    fn entities_for_device(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Entity>, KasaHelperError>> + Send;
}

/// Lookup of persisted config entries.
pub trait ConfigEntryStore {
    /// Get a config entry by id.
    fn get_entry(
        &self,
        id: &ConfigEntryId,
    ) -> impl Future<Output = Result<Option<ConfigEntry>, KasaHelperError>> + Send;
}

impl<T: AreaRegistry + Send + Sync> AreaRegistry for Arc<T> {
    fn get_area(
        &self,
        id: &AreaId,
    ) -> impl Future<Output = Result<Option<Area>, KasaHelperError>> + Send {
        (**self).get_area(id)
    }

    fn areas_for_label(
        &self,
        label: &LabelId,
    ) -> impl Future<Output = Result<Vec<Area>, KasaHelperError>> + Send {
        (**self).areas_for_label(label)
    }

    fn areas_for_floor(
        &self,
        floor: &FloorId,
    ) -> impl Future<Output = Result<Vec<Area>, KasaHelperError>> + Send {
        (**self).areas_for_floor(floor)
    }
}

impl<T: DeviceRegistry + Send + Sync> DeviceRegistry for Arc<T> {
    fn get_device(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, KasaHelperError>> + Send {
        (**self).get_device(id)
    }

    fn devices_for_label(
        &self,
        label: &LabelId,
    ) -> impl Future<Output = Result<Vec<Device>, KasaHelperError>> + Send {
        (**self).devices_for_label(label)
    }

    fn devices_for_area(
        &self,
        area: &AreaId,
    ) -> impl Future<Output = Result<Vec<Device>, KasaHelperError>> + Send {
        (**self).devices_for_area(area)
    }
}

impl<T: EntityRegistry + Send + Sync> EntityRegistry for Arc<T> {
    fn get_entity(
        &self,
        entity_id: &str,
    ) -> impl Future<Output = Result<Option<Entity>, KasaHelperError>> + Send {
        (**self).get_entity(entity_id)
    }

    fn entities_for_label(
        &self,
        label: &LabelId,
    ) -> impl Future<Output = Result<Vec<Entity>, KasaHelperError>> + Send {
        (**self).entities_for_label(label)
    }

    fn entities_for_area(
        &self,
        area: &AreaId,
    ) -> impl Future<Output = Result<Vec<Entity>, KasaHelperError>> + Send {
        (**self).entities_for_area(area)
    }

    fn entities_for_device(
        &self,
        device: &DeviceId,
    ) -> impl Future<Output = Result<Vec<Entity>, KasaHelperError>> + Send {
        (**self).entities_for_device(device)
    }
}

impl<T: ConfigEntryStore + Send + Sync> ConfigEntryStore for Arc<T> {
    fn get_entry(
        &self,
        id: &ConfigEntryId,
    ) -> impl Future<Output = Result<Option<ConfigEntry>, KasaHelperError>> + Send {
        (**self).get_entry(id)
    }
}
