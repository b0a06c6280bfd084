//! # kasa-helper-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `GET` | `/health` | liveness probe |
//! | `POST` | `/api/services/kasa_helper/set_brightness` | invoke the service |
//!
//! The service body uses the host's target-selector shape: any of
//! `label_id`, `floor_id`, `area_id`, `device_id`, `entity_id` (a string or
//! a list) plus an optional `brightness`.
//!
//! ## Dependency rule
//! Depends on `kasa-helper-app` (for port traits and services) and
//! `kasa-helper-domain` (for request/response mapping). Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
