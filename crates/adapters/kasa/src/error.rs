//! Kasa adapter error types.

use kasa_helper_domain::config_entry::EncryptionType;
use kasa_helper_domain::error::KasaHelperError;

/// Errors specific to talking with a Kasa device.
#[derive(Debug, thiserror::Error)]
pub enum KasaError {
    /// Socket-level failure on the XOR transport.
    #[error("connection to {host} failed")]
    Io {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP failure on the KLAP transport.
    #[error("request to {host} failed")]
    Http {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    /// The device did not answer within the configured timeout.
    #[error("{host} did not answer in time")]
    Timeout { host: String },

    /// The device announced a frame larger than any valid response.
    #[error("{host} announced a {len} byte frame")]
    FrameTooLarge { host: String, len: usize },

    /// The device answered with a non-success HTTP status.
    #[error("{host} answered {path} with status {status}")]
    Status {
        host: String,
        path: &'static str,
        status: u16,
    },

    /// The KLAP handshake could not be completed.
    #[error("handshake with {host} failed: {reason}")]
    Handshake { host: String, reason: &'static str },

    /// The entry holds no usable credentials hash for an authenticated transport.
    #[error("{host} requires credentials")]
    MissingCredentials { host: String },

    /// A payload could not be decrypted or had a bad signature.
    #[error("could not decrypt payload from {host}")]
    Decrypt { host: String },

    /// A payload could not be encoded or decoded as JSON.
    #[error("invalid JSON payload")]
    Json(#[from] serde_json::Error),

    /// The device rejected a request.
    #[error("{method} returned error code {code}")]
    Device { method: &'static str, code: i64 },

    /// The response lacked a field the request should have produced.
    #[error("{method} response is missing {field}")]
    MalformedResponse {
        method: &'static str,
        field: &'static str,
    },

    /// The encryption type has no transport here.
    #[error("{0} encryption is not supported")]
    UnsupportedEncryption(EncryptionType),

    /// The call does not exist in the protocol spoken by this device.
    #[error("{operation} is not available over the {protocol} protocol")]
    WrongProtocol {
        operation: &'static str,
        protocol: &'static str,
    },
}

impl From<KasaError> for KasaHelperError {
    fn from(err: KasaError) -> Self {
        Self::Device(Box::new(err))
    }
}
