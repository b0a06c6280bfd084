//! KLAP transport: a two-step seed handshake over HTTP, then AES-128-CBC
//! payloads signed with a per-request sequence number.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use reqwest::header::{COOKIE, SET_COOKIE};
use sha2::{Digest, Sha256};

use kasa_helper_domain::config_entry::DeviceFamily;

use crate::error::KasaError;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

const SEED_LEN: usize = 16;
const HASH_LEN: usize = 32;
const SESSION_COOKIE: &str = "TP_SESSIONID";

pub(crate) const DEFAULT_HTTP_PORT: u16 = 80;
pub(crate) const DEFAULT_HTTPS_PORT: u16 = 4433;

fn sha256(parts: &[&[u8]]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Handshake hash scheme: `IOT.*` devices behind KLAP use the first
/// scheme, `SMART.*` devices the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KlapVersion {
    V1,
    V2,
}

impl KlapVersion {
    pub(crate) fn for_family(family: &DeviceFamily) -> Self {
        if family.is_smart() {
            Self::V2
        } else {
            Self::V1
        }
    }

    /// Hash the device must return from handshake1.
    pub(crate) fn server_hash(
        self,
        local: &[u8],
        remote: &[u8],
        auth: &[u8],
    ) -> [u8; HASH_LEN] {
        match self {
            Self::V1 => sha256(&[local, auth]),
            Self::V2 => sha256(&[local, remote, auth]),
        }
    }

    /// Hash the client sends in handshake2.
    pub(crate) fn client_hash(
        self,
        local: &[u8],
        remote: &[u8],
        auth: &[u8],
    ) -> [u8; HASH_LEN] {
        match self {
            Self::V1 => sha256(&[remote, auth]),
            Self::V2 => sha256(&[remote, local, auth]),
        }
    }
}

/// Symmetric keys derived from both seeds, plus the running sequence.
#[derive(Clone)]
pub(crate) struct KlapCipher {
    key: [u8; 16],
    iv: [u8; 12],
    sig: [u8; 28],
    seq: i32,
}

impl KlapCipher {
    pub(crate) fn new(local: &[u8], remote: &[u8], auth: &[u8]) -> Self {
        let key_hash = sha256(&[b"lsk", local, remote, auth]);
        let iv_hash = sha256(&[b"iv", local, remote, auth]);
        let sig_hash = sha256(&[b"ldk", local, remote, auth]);

        let mut key = [0u8; 16];
        key.copy_from_slice(&key_hash[..16]);
        let mut iv = [0u8; 12];
        iv.copy_from_slice(&iv_hash[..12]);
        let mut seq = [0u8; 4];
        seq.copy_from_slice(&iv_hash[HASH_LEN - 4..]);
        let mut sig = [0u8; 28];
        sig.copy_from_slice(&sig_hash[..28]);

        Self {
            key,
            iv,
            sig,
            seq: i32::from_be_bytes(seq),
        }
    }

    fn iv_for(&self, seq: i32) -> [u8; 16] {
        let mut iv = [0u8; 16];
        iv[..12].copy_from_slice(&self.iv);
        iv[12..].copy_from_slice(&seq.to_be_bytes());
        iv
    }

    /// Advance the sequence and produce `signature || ciphertext`.
    pub(crate) fn encrypt(&mut self, plaintext: &[u8]) -> (Vec<u8>, i32) {
        self.seq = self.seq.wrapping_add(1);
        let seq = self.seq;
        let ciphertext = Aes128CbcEnc::new(&self.key.into(), &self.iv_for(seq).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let signature = sha256(&[&self.sig, &seq.to_be_bytes(), &ciphertext]);
        let mut payload = Vec::with_capacity(HASH_LEN + ciphertext.len());
        payload.extend_from_slice(&signature);
        payload.extend_from_slice(&ciphertext);
        (payload, seq)
    }

    /// Decrypt a response produced for request `seq`.
    pub(crate) fn decrypt(&self, seq: i32, payload: &[u8]) -> Option<Vec<u8>> {
        let ciphertext = payload.get(HASH_LEN..)?;
        Aes128CbcDec::new(&self.key.into(), &self.iv_for(seq).into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .ok()
    }
}

/// Pull `TP_SESSIONID=...` out of a `Set-Cookie` header value.
fn session_cookie(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find(|part| {
            part.split_once('=')
                .is_some_and(|(name, _)| name == SESSION_COOKIE)
        })
        .map(ToString::to_string)
}

struct Session {
    cipher: KlapCipher,
    cookie: Option<String>,
}

/// HTTP transport that performs the handshake lazily and re-handshakes
/// after any failed request.
pub(crate) struct KlapTransport {
    host: String,
    base_url: String,
    client: reqwest::Client,
    auth_hash: Vec<u8>,
    version: KlapVersion,
    session: Option<Session>,
}

impl KlapTransport {
    pub(crate) fn new(
        client: reqwest::Client,
        host: String,
        https: bool,
        port: Option<u16>,
        auth_hash: Vec<u8>,
        version: KlapVersion,
    ) -> Self {
        let (scheme, default_port) = if https {
            ("https", DEFAULT_HTTPS_PORT)
        } else {
            ("http", DEFAULT_HTTP_PORT)
        };
        let base_url = format!("{scheme}://{host}:{}/app", port.unwrap_or(default_port));
        Self {
            host,
            base_url,
            client,
            auth_hash,
            version,
            session: None,
        }
    }

    pub(crate) fn host(&self) -> &str {
        &self.host
    }

    pub(crate) async fn send(&mut self, request: &[u8]) -> Result<Vec<u8>, KasaError> {
        let mut session = match self.session.take() {
            Some(session) => session,
            None => self.handshake().await?,
        };
        let response = self.request(&mut session, request).await?;
        self.session = Some(session);
        Ok(response)
    }

    #[tracing::instrument(skip(self), fields(host = %self.host))]
    async fn handshake(&self) -> Result<Session, KasaError> {
        let mut local_seed = [0u8; SEED_LEN];
        rand::thread_rng().fill_bytes(&mut local_seed);

        let response = self
            .post("handshake1", None, local_seed.to_vec(), None)
            .await?;
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_cookie);
        let body = response.bytes().await.map_err(|source| self.http_error(source))?;
        if body.len() != SEED_LEN + HASH_LEN {
            return Err(self.handshake_error("unexpected handshake1 length"));
        }

        let (remote_seed, server_hash) = body.split_at(SEED_LEN);
        let expected = self
            .version
            .server_hash(&local_seed, remote_seed, &self.auth_hash);
        if server_hash != expected {
            return Err(self.handshake_error("device rejected the credentials hash"));
        }

        let client_hash = self
            .version
            .client_hash(&local_seed, remote_seed, &self.auth_hash);
        self.post("handshake2", None, client_hash.to_vec(), cookie.as_deref())
            .await?;

        tracing::debug!("session established");
        Ok(Session {
            cipher: KlapCipher::new(&local_seed, remote_seed, &self.auth_hash),
            cookie,
        })
    }

    async fn request(&self, session: &mut Session, request: &[u8]) -> Result<Vec<u8>, KasaError> {
        let (payload, seq) = session.cipher.encrypt(request);
        let response = self
            .post("request", Some(seq), payload, session.cookie.as_deref())
            .await?;
        let body = response.bytes().await.map_err(|source| self.http_error(source))?;
        session
            .cipher
            .decrypt(seq, &body)
            .ok_or_else(|| KasaError::Decrypt {
                host: self.host.clone(),
            })
    }

    async fn post(
        &self,
        path: &'static str,
        seq: Option<i32>,
        body: Vec<u8>,
        cookie: Option<&str>,
    ) -> Result<reqwest::Response, KasaError> {
        let url = match seq {
            Some(seq) => format!("{}/{path}?seq={seq}", self.base_url),
            None => format!("{}/{path}", self.base_url),
        };
        let mut request = self.client.post(url).body(body);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|source| self.http_error(source))?;
        if !response.status().is_success() {
            return Err(KasaError::Status {
                host: self.host.clone(),
                path,
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }

    fn http_error(&self, source: reqwest::Error) -> KasaError {
        if source.is_timeout() {
            KasaError::Timeout {
                host: self.host.clone(),
            }
        } else {
            KasaError::Http {
                host: self.host.clone(),
                source,
            }
        }
    }

    fn handshake_error(&self, reason: &'static str) -> KasaError {
        KasaError::Handshake {
            host: self.host.clone(),
            reason,
        }
    }
}
