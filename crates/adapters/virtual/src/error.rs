//! Virtual adapter error types.

use kasa_helper_domain::error::KasaHelperError;

#[derive(Debug, thiserror::Error)]
pub enum VirtualError {
    /// No simulated device answers at this host.
    #[error("no virtual device at {0}")]
    UnknownHost(String),

    /// The call belongs to the other protocol.
    #[error("{host} does not implement {operation}")]
    WrongKind {
        host: String,
        operation: &'static str,
    },
}

impl From<VirtualError> for KasaHelperError {
    fn from(err: VirtualError) -> Self {
        Self::Device(Box::new(err))
    }
}
