//! Parsing of the host's `.storage` registry files.

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use kasa_helper_domain::area::Area;
use kasa_helper_domain::config_entry::ConfigEntry;
use kasa_helper_domain::device::Device;
use kasa_helper_domain::entity::Entity;

use crate::error::HaStorageError;

const AREA_REGISTRY: &str = "core.area_registry";
const DEVICE_REGISTRY: &str = "core.device_registry";
const ENTITY_REGISTRY: &str = "core.entity_registry";
const CONFIG_ENTRIES: &str = "core.config_entries";

/// Envelope shared by every store file: `{"version", "key", "data"}`.
#[derive(Deserialize)]
struct StoreFile<T> {
    key: String,
    data: T,
}

#[derive(Deserialize)]
struct AreaData {
    areas: Vec<Area>,
}

#[derive(Deserialize)]
struct DeviceData {
    devices: Vec<Device>,
}

#[derive(Deserialize)]
struct EntityData {
    entities: Vec<Entity>,
}

#[derive(Deserialize)]
struct ConfigEntryData {
    entries: Vec<ConfigEntry>,
}

/// All four registries as read at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    pub areas: Vec<Area>,
    pub devices: Vec<Device>,
    pub entities: Vec<Entity>,
    pub entries: Vec<ConfigEntry>,
}

impl RegistrySnapshot {
    /// Read the registry files from a `.storage` directory.
    ///
    /// # Errors
    ///
    /// Returns [`HaStorageError`] if a file is missing, unreadable, malformed,
    /// or holds a different store than its name says.
    pub fn load(storage_dir: &Path) -> Result<Self, HaStorageError> {
        let read = |file: &'static str| {
            std::fs::read_to_string(storage_dir.join(file)).map_err(|source| HaStorageError::Io {
                file: file.to_string(),
                source,
            })
        };

        let snapshot = Self::from_json(
            &read(AREA_REGISTRY)?,
            &read(DEVICE_REGISTRY)?,
            &read(ENTITY_REGISTRY)?,
            &read(CONFIG_ENTRIES)?,
        )?;
        tracing::info!(
            storage_dir = %storage_dir.display(),
            areas = snapshot.areas.len(),
            devices = snapshot.devices.len(),
            entities = snapshot.entities.len(),
            entries = snapshot.entries.len(),
            "registries loaded"
        );
        Ok(snapshot)
    }

    /// Parse the four registry documents from strings.
    ///
    /// # Errors
    ///
    /// Returns [`HaStorageError`] if a document is malformed or holds a
    /// different store than expected.
    pub fn from_json(
        areas: &str,
        devices: &str,
        entities: &str,
        entries: &str,
    ) -> Result<Self, HaStorageError> {
        let areas: AreaData = parse(AREA_REGISTRY, areas)?;
        let devices: DeviceData = parse(DEVICE_REGISTRY, devices)?;
        let entities: EntityData = parse(ENTITY_REGISTRY, entities)?;
        let entries: ConfigEntryData = parse(CONFIG_ENTRIES, entries)?;
        Ok(Self {
            areas: areas.areas,
            devices: devices.devices,
            entities: entities.entities,
            entries: entries.entries,
        })
    }
}

fn parse<T: DeserializeOwned>(expected: &'static str, content: &str) -> Result<T, HaStorageError> {
    let store: StoreFile<T> =
        serde_json::from_str(content).map_err(|source| HaStorageError::Parse {
            file: expected.to_string(),
            source,
        })?;
    if store.key != expected {
        return Err(HaStorageError::UnexpectedKey {
            file: expected.to_string(),
            expected,
            found: store.key,
        });
    }
    Ok(store.data)
}
