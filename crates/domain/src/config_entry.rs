//! Config entries: the host's persisted per-device connection settings.
//!
//! The TP-Link integration stores, per physical device, enough to open a raw
//! connection independent of the host's own connection pool: a host address,
//! a credentials hash and the connection-type parameters negotiated at setup.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::id::ConfigEntryId;

/// A config entry as stored by the host.
///
/// `data` is kept as raw JSON: every integration stores its own shape there,
/// and only TP-Link entries are ever read as [`ConfigEntryData`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: ConfigEntryId,
    pub domain: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub data: Value,
}

impl ConfigEntry {
    /// The `host` field of the entry data, when it is a string.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.data.get("host").and_then(Value::as_str)
    }
}

/// The `data` section of a TP-Link config entry.
///
/// Unknown keys (aliases, port overrides, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntryData {
    pub host: Option<String>,
    pub credentials_hash: Option<String>,
    pub connection_parameters: Option<ConnectionParameters>,
}

/// How the device expects to be spoken to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParameters {
    pub device_family: DeviceFamily,
    pub encryption_type: EncryptionType,
    #[serde(default)]
    pub login_version: Option<u8>,
    #[serde(default)]
    pub https: bool,
    #[serde(default)]
    pub http_port: Option<u16>,
}

impl Default for ConnectionParameters {
    /// Plain legacy plug/switch over the XOR transport.
    fn default() -> Self {
        Self {
            device_family: DeviceFamily::new(DeviceFamily::IOT_SMART_PLUG_SWITCH),
            encryption_type: EncryptionType::Xor,
            login_version: None,
            https: false,
            http_port: None,
        }
    }
}

/// Device family tag such as `IOT.SMARTPLUGSWITCH` or `SMART.KASASWITCH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceFamily(String);

impl DeviceFamily {
    pub const IOT_SMART_PLUG_SWITCH: &'static str = "IOT.SMARTPLUGSWITCH";
    pub const SMART_KASA_SWITCH: &'static str = "SMART.KASASWITCH";

    #[must_use]
    pub fn new(family: impl Into<String>) -> Self {
        Self(family.into())
    }

    /// Families spoken to with the legacy IOT protocol.
    #[must_use]
    pub fn is_iot(&self) -> bool {
        self.0.starts_with("IOT.")
    }

    /// Families spoken to with the SMART protocol.
    #[must_use]
    pub fn is_smart(&self) -> bool {
        self.0.starts_with("SMART.")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport encryption negotiated with the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EncryptionType {
    Xor,
    Klap,
    Aes,
}

impl fmt::Display for EncryptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xor => f.write_str("XOR"),
            Self::Klap => f.write_str("KLAP"),
            Self::Aes => f.write_str("AES"),
        }
    }
}

/// Everything a device connector needs to reach one physical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    pub host: String,
    pub credentials_hash: Option<String>,
    pub connection: ConnectionParameters,
}

impl DeviceConfig {
    /// Build a device configuration from a persisted config entry.
    ///
    /// Entries written before connection parameters were recorded fall back
    /// to [`ConnectionParameters::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedEntryData`] when the data does not
    /// have the TP-Link shape, and [`ValidationError::MissingHost`] when it
    /// has no host.
    pub fn from_entry(entry: &ConfigEntry) -> Result<Self, ValidationError> {
        let data = if entry.data.is_null() {
            ConfigEntryData::default()
        } else {
            ConfigEntryData::deserialize(&entry.data)
                .map_err(|err| ValidationError::MalformedEntryData(err.to_string()))?
        };
        let host = data
            .host
            .filter(|host| !host.is_empty())
            .ok_or(ValidationError::MissingHost)?;
        Ok(Self {
            host,
            credentials_hash: data.credentials_hash,
            connection: data.connection_parameters.unwrap_or_default(),
        })
    }
}
