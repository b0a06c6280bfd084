//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`KasaHelperError`] via `From` at the port boundary.

/// Top-level error returned by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum KasaHelperError {
    /// Input rejected by a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A record that was expected to exist is missing.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The device answered but does not expose a usable brightness control.
    #[error("unsupported device")]
    UnsupportedDevice(#[from] UnsupportedDeviceError),

    /// A host registry could not be read.
    #[error("registry error")]
    Registry(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Connecting to or talking with a physical device failed.
    #[error("device error")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("entity id {0:?} is not of the form <domain>.<object_id>")]
    MalformedEntityId(String),

    #[error("brightness {0} is outside 0..=100")]
    BrightnessOutOfRange(i64),

    #[error("config entry has no host")]
    MissingHost,

    #[error("config entry data is malformed: {0}")]
    MalformedEntryData(String),
}

/// A lookup that came back empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// Raised when a connection reports a capability that cannot dim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{host} ({model}) is not a supported dimmer")]
pub struct UnsupportedDeviceError {
    pub host: String,
    pub model: String,
}
