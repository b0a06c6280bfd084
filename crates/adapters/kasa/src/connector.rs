use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use kasa_helper_app::ports::DeviceConnector;
use kasa_helper_domain::config_entry::{DeviceConfig, EncryptionType};
use kasa_helper_domain::error::KasaHelperError;

use crate::config::KasaConfig;
use crate::connection::{KasaConnection, Protocol};
use crate::error::KasaError;
use crate::klap::{KlapTransport, KlapVersion};
use crate::transport::Transport;
use crate::xor::XorTransport;

/// Opens [`KasaConnection`]s from config entries.
///
/// Holds one HTTP client shared by every KLAP connection.
#[derive(Debug, Clone)]
pub struct KasaConnector {
    config: KasaConfig,
    client: reqwest::Client,
}

impl KasaConnector {
    /// # Errors
    ///
    /// Returns [`KasaError::Http`] if the HTTP client cannot be built.
    pub fn new(config: KasaConfig) -> Result<Self, KasaError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            // Devices serve self-signed certificates on the HTTPS port.
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|source| KasaError::Http {
                host: String::new(),
                source,
            })?;
        Ok(Self { config, client })
    }

    fn transport(&self, device: &DeviceConfig) -> Result<Transport, KasaError> {
        let params = &device.connection;
        match params.encryption_type {
            EncryptionType::Xor => Ok(Transport::Xor(XorTransport::new(
                device.host.clone(),
                self.config.xor_port,
                self.config.timeout(),
            ))),
            EncryptionType::Klap => {
                let auth_hash = decode_credentials(device)?;
                Ok(Transport::Klap(KlapTransport::new(
                    self.client.clone(),
                    device.host.clone(),
                    params.https,
                    params.http_port,
                    auth_hash,
                    KlapVersion::for_family(&params.device_family),
                )))
            }
            EncryptionType::Aes => Err(KasaError::UnsupportedEncryption(EncryptionType::Aes)),
        }
    }
}

fn protocol(device: &DeviceConfig) -> Protocol {
    if device.connection.device_family.is_smart() {
        Protocol::Smart
    } else {
        Protocol::Iot
    }
}

/// The stored credentials hash is the base64 of the raw auth hash.
fn decode_credentials(device: &DeviceConfig) -> Result<Vec<u8>, KasaError> {
    device
        .credentials_hash
        .as_deref()
        .filter(|hash| !hash.is_empty())
        .and_then(|hash| STANDARD.decode(hash).ok())
        .ok_or_else(|| KasaError::MissingCredentials {
            host: device.host.clone(),
        })
}

impl DeviceConnector for KasaConnector {
    type Connection = KasaConnection;

    #[tracing::instrument(skip(self, config), fields(host = %config.host))]
    async fn connect(&self, config: &DeviceConfig) -> Result<KasaConnection, KasaHelperError> {
        let transport = self.transport(config)?;
        let connection = KasaConnection::open(transport, protocol(config)).await?;
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use kasa_helper_domain::config_entry::{ConnectionParameters, DeviceFamily};

    use super::*;

    fn device(params: ConnectionParameters, credentials_hash: Option<&str>) -> DeviceConfig {
        DeviceConfig {
            host: "192.168.1.30".to_string(),
            credentials_hash: credentials_hash.map(ToString::to_string),
            connection: params,
        }
    }

    fn klap_params() -> ConnectionParameters {
        ConnectionParameters {
            device_family: DeviceFamily::new(DeviceFamily::SMART_KASA_SWITCH),
            encryption_type: EncryptionType::Klap,
            login_version: None,
            https: false,
            http_port: None,
        }
    }

    #[test]
    fn should_pick_protocol_from_device_family() {
        assert_eq!(protocol(&device(klap_params(), None)), Protocol::Smart);
        assert_eq!(
            protocol(&device(ConnectionParameters::default(), None)),
            Protocol::Iot
        );
    }

    #[test]
    fn should_decode_credentials_hash() {
        let config = device(klap_params(), Some("AQIDBA=="));
        assert_eq!(decode_credentials(&config).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn should_require_credentials_for_klap() {
        let connector = KasaConnector::new(KasaConfig::default()).unwrap();
        let result = connector.transport(&device(klap_params(), None));
        assert!(matches!(result, Err(KasaError::MissingCredentials { .. })));
    }

    #[tokio::test]
    async fn should_reject_aes_encryption() {
        let connector = KasaConnector::new(KasaConfig::default()).unwrap();
        let params = ConnectionParameters {
            encryption_type: EncryptionType::Aes,
            ..klap_params()
        };

        let result = connector.connect(&device(params, Some("AQIDBA=="))).await;
        let Err(KasaHelperError::Device(source)) = result else {
            panic!("expected a device error");
        };
        assert_eq!(source.to_string(), "AES encryption is not supported");
    }
}
