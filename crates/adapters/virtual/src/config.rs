//! Virtual device declarations.

use serde::Deserialize;

/// Which protocol a simulated device pretends to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualKind {
    Legacy,
    Module,
    Unsupported,
}

impl VirtualKind {
    fn default_model(self) -> &'static str {
        match self {
            Self::Legacy => "HS220",
            Self::Module => "KS225",
            Self::Unsupported => "HS100",
        }
    }
}

/// One simulated device, as declared in `[[devices.virtual]]`.
#[derive(Debug, Clone, Deserialize)]
pub struct VirtualDeviceConfig {
    pub host: String,
    pub kind: VirtualKind,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub device_on: bool,
    #[serde(default = "default_brightness")]
    pub brightness: u8,
}

fn default_brightness() -> u8 {
    100
}

impl VirtualDeviceConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, kind: VirtualKind) -> Self {
        Self {
            host: host.into(),
            kind,
            model: None,
            device_on: false,
            brightness: default_brightness(),
        }
    }

    #[must_use]
    pub fn with_power(mut self, device_on: bool) -> Self {
        self.device_on = device_on;
        self
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.kind.default_model())
    }
}
