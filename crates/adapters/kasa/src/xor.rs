//! Legacy TCP transport: 4-byte big-endian length prefix followed by the
//! JSON payload under an autokey XOR cipher.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::KasaError;

const INITIAL_KEY: u8 = 171;
/// Largest frame body accepted from a device.
pub(crate) const MAX_FRAME_LEN: usize = 64 * 1024;

/// Encrypt a payload and prepend its length.
pub(crate) fn encode(plaintext: &[u8]) -> Vec<u8> {
    #[allow(clippy::cast_possible_truncation)]
    let len = plaintext.len() as u32;
    let mut out = Vec::with_capacity(plaintext.len() + 4);
    out.extend_from_slice(&len.to_be_bytes());
    let mut key = INITIAL_KEY;
    for byte in plaintext {
        key ^= byte;
        out.push(key);
    }
    out
}

/// Decrypt a payload body (without its length prefix).
pub(crate) fn decode(ciphertext: &[u8]) -> Vec<u8> {
    let mut key = INITIAL_KEY;
    ciphertext
        .iter()
        .map(|&byte| {
            let plain = key ^ byte;
            key = byte;
            plain
        })
        .collect()
}

/// Read one length-prefixed frame body, still encrypted.
pub(crate) async fn read_frame<R>(reader: &mut R, host: &str) -> Result<Vec<u8>, KasaError>
where
    R: AsyncRead + Unpin,
{
    let io_error = |source| KasaError::Io {
        host: host.to_string(),
        source,
    };
    let mut len = [0u8; 4];
    reader.read_exact(&mut len).await.map_err(io_error)?;
    let len = usize::try_from(u32::from_be_bytes(len)).unwrap_or(usize::MAX);
    if len > MAX_FRAME_LEN {
        return Err(KasaError::FrameTooLarge {
            host: host.to_string(),
            len,
        });
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await.map_err(io_error)?;
    Ok(body)
}

/// One request per TCP connection, as the devices expect.
#[derive(Debug)]
pub(crate) struct XorTransport {
    host: String,
    port: u16,
    timeout: Duration,
}

impl XorTransport {
    pub(crate) fn new(host: String, port: u16, timeout: Duration) -> Self {
        Self {
            host,
            port,
            timeout,
        }
    }

    pub(crate) fn host(&self) -> &str {
        &self.host
    }

    pub(crate) async fn send(&self, request: &[u8]) -> Result<Vec<u8>, KasaError> {
        tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| KasaError::Timeout {
                host: self.host.clone(),
            })?
    }

    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>, KasaError> {
        let io_error = |source| KasaError::Io {
            host: self.host.clone(),
            source,
        };
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(io_error)?;
        stream.write_all(&encode(request)).await.map_err(io_error)?;

        let body = read_frame(&mut stream, &self.host).await?;
        Ok(decode(&body))
    }
}
