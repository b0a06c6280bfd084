//! # kasa-helper-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AreaRegistry`, `DeviceRegistry`, `EntityRegistry`: read-only views
//!     of the host registries
//!   - `ConfigEntryStore`: read-only lookup of per-device connection settings
//!   - `DeviceConnector`: opens a connection to a physical dimmer
//! - Define the **driving/inbound** use-case:
//!   - `SetBrightnessHandler`: resolve targets, then dispatch brightness
//! - Orchestrate domain objects without knowing *how* registries are stored
//!   or *how* devices are reached
//!
//! ## Dependency rule
//! Depends on `kasa-helper-domain` only (plus `futures` for the fan-out join).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
