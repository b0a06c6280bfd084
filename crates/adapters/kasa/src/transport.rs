use serde_json::Value;

use crate::error::KasaError;
use crate::klap::KlapTransport;
use crate::xor::XorTransport;

/// Byte pipe carrying JSON requests to one device.
pub(crate) enum Transport {
    Xor(XorTransport),
    Klap(KlapTransport),
}

impl Transport {
    pub(crate) fn host(&self) -> &str {
        match self {
            Self::Xor(transport) => transport.host(),
            Self::Klap(transport) => transport.host(),
        }
    }

    pub(crate) async fn send(&mut self, request: &Value) -> Result<Value, KasaError> {
        let payload = serde_json::to_vec(request)?;
        let response = match self {
            Self::Xor(transport) => transport.send(&payload).await?,
            Self::Klap(transport) => transport.send(&payload).await?,
        };
        tracing::trace!(host = self.host(), bytes = response.len(), "response received");
        Ok(serde_json::from_slice(&response)?)
    }
}
