//! Simulated dimmer state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use kasa_helper_app::ports::DimmerCapability;

use crate::config::{VirtualDeviceConfig, VirtualKind};

/// Observable state of a simulated dimmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimmerState {
    pub device_on: bool,
    pub brightness: u8,
}

/// A simulated device shared by every connection opened against its host.
#[derive(Debug)]
pub(crate) struct VirtualDimmer {
    host: String,
    model: String,
    kind: VirtualKind,
    state: Mutex<DimmerState>,
}

impl VirtualDimmer {
    pub(crate) fn new(config: &VirtualDeviceConfig) -> Self {
        Self {
            host: config.host.clone(),
            model: config.model().to_string(),
            kind: config.kind,
            state: Mutex::new(DimmerState {
                device_on: config.device_on,
                brightness: config.brightness,
            }),
        }
    }

    pub(crate) fn host(&self) -> &str {
        &self.host
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn kind(&self) -> VirtualKind {
        self.kind
    }

    pub(crate) fn capability(&self) -> DimmerCapability {
        match self.kind {
            VirtualKind::Legacy => DimmerCapability::LegacyDimmer,
            VirtualKind::Module => DimmerCapability::BrightnessModule,
            VirtualKind::Unsupported => DimmerCapability::Unsupported,
        }
    }

    pub(crate) fn state(&self) -> DimmerState {
        *self.lock_state()
    }

    /// Legacy dimmer call: power is left alone.
    pub(crate) fn set_brightness(&self, brightness: u8) {
        self.lock_state().brightness = brightness;
    }

    /// Module call: power is whatever the caller sends.
    pub(crate) fn set_device_info(&self, brightness: u8, device_on: bool) {
        *self.lock_state() = DimmerState {
            device_on,
            brightness,
        };
    }

    fn lock_state(&self) -> MutexGuard<'_, DimmerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
