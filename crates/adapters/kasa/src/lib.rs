//! # kasa-helper-adapter-kasa
//!
//! Device adapter for TP-Link Kasa dimmers on the local network.
//!
//! ## Transports
//!
//! | Encryption | Transport | Wire format |
//! |------------|-----------|-------------|
//! | `XOR` | TCP port 9999 | length-prefixed JSON, autokey XOR cipher |
//! | `KLAP` | HTTP `/app/*` | two-step seed handshake, AES-128-CBC payloads |
//! | `AES` | | not supported, see below |
//!
//! ## Unsupported: the `AES` transport
//!
//! Some `SMART.*` devices (mostly Tapo, and Kasa firmware that predates KLAP)
//! negotiate the `AES` transport: an RSA key exchange followed by a
//! `securePassthrough` envelope. This adapter does not implement it.
//! Entries with `encryption_type = "AES"` fail per device with
//! [`KasaError::UnsupportedEncryption`] and never reach the network.
//!
//! ## Protocols
//!
//! The device family selects the request dialect carried by the transport:
//! `IOT.*` devices speak the legacy `{"system":{"get_sysinfo":{}}}` dialect,
//! `SMART.*` devices speak `{"method": ..., "params": ...}`.
//! The family also picks the KLAP handshake hashes: `IOT.*` devices use the
//! first scheme, `SMART.*` devices the second.
//!
//! [`KasaConnector`] opens a [`KasaConnection`] per dispatch and reports the
//! [`DimmerCapability`](kasa_helper_app::ports::DimmerCapability) it found.
//!
//! ## Dependency rule
//!
//! Depends on `kasa-helper-app` (port traits) and `kasa-helper-domain` only.

mod config;
mod connection;
mod connector;
mod error;
mod iot;
mod klap;
mod smart;
mod transport;
mod xor;

pub use config::KasaConfig;
pub use connection::KasaConnection;
pub use connector::KasaConnector;
pub use error::KasaError;
