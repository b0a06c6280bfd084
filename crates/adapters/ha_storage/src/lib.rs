//! # kasa-helper-adapter-ha-storage
//!
//! Read-only registry adapter backed by the host's `.storage` directory.
//!
//! ## Files read
//!
//! | File | Key | Provides |
//! |------|-----|----------|
//! | `core.area_registry` | `data.areas` | `AreaRegistry` |
//! | `core.device_registry` | `data.devices` | `DeviceRegistry` |
//! | `core.entity_registry` | `data.entities` | `EntityRegistry` |
//! | `core.config_entries` | `data.entries` | `ConfigEntryStore` |
//!
//! The files are parsed once into a [`RegistrySnapshot`]; this adapter never
//! writes to them.
//!
//! ## Dependency rule
//!
//! Depends on `kasa-helper-app` (port traits) and `kasa-helper-domain` only.

mod error;
mod registry;
mod snapshot;

pub use error::HaStorageError;
pub use registry::HaRegistry;
pub use snapshot::RegistrySnapshot;
