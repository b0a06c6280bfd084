//! # kasa-helper-adapter-virtual
//!
//! Simulated dimmers answering the device-control port without a network.
//!
//! ## Device kinds
//!
//! | Kind | Capability | Behaviour |
//! |------|------------|-----------|
//! | `legacy` | `LegacyDimmer` | `set_brightness` changes brightness only |
//! | `module` | `BrightnessModule` | `set_device_info` writes brightness and power together |
//! | `unsupported` | `Unsupported` | connects, but cannot be dimmed |
//!
//! Devices are keyed by host, so config entries in the registry snapshot
//! point at them exactly as they would at real hardware.
//!
//! ## Dependency rule
//!
//! Depends on `kasa-helper-app` (port traits) and `kasa-helper-domain` only.

mod config;
mod connector;
mod dimmer;
mod error;

pub use config::{VirtualDeviceConfig, VirtualKind};
pub use connector::{VirtualConnection, VirtualConnector};
pub use dimmer::DimmerState;
pub use error::VirtualError;
