//! Kasa adapter configuration.

use std::time::Duration;

use serde::Deserialize;

/// Network settings shared by every device connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KasaConfig {
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
    /// TCP port of the legacy XOR transport.
    pub xor_port: u16,
}

impl KasaConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for KasaConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            xor_port: 9999,
        }
    }
}
