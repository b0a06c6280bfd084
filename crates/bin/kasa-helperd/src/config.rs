//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `kasa-helper.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

use kasa_helper_adapter_kasa::KasaConfig;
use kasa_helper_adapter_virtual::VirtualDeviceConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Where the host's registries live.
    pub registry: RegistryConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Device backend selection.
    pub devices: DevicesConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Registry snapshot location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// The host's `.storage` directory.
    pub storage_dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Which [`DeviceConnector`](kasa_helper_app::ports::DeviceConnector) to wire.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceBackend {
    /// Real devices on the local network.
    #[default]
    Kasa,
    /// Simulated devices declared in `[[devices.virtual]]`.
    Virtual,
}

/// Device backend configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    pub backend: DeviceBackend,
    #[serde(flatten)]
    pub kasa: KasaConfig,
    #[serde(rename = "virtual")]
    pub virtual_devices: Vec<VirtualDeviceConfig>,
}

impl Config {
    /// Load configuration from `kasa-helper.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("kasa-helper.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("KASA_HELPER_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("KASA_HELPER_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("KASA_HELPER_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("KASA_HELPER_STORAGE_DIR") {
            self.registry.storage_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("KASA_HELPER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.devices.kasa.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "device timeout must be non-zero".to_string(),
            ));
        }
        if self.registry.storage_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "registry storage_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".storage"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "kasa_helper=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
