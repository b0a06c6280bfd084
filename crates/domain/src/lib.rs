//! # kasa-helper-domain
//!
//! Pure domain model for the kasa-helper integration.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Read-only views of the host registries: **Areas**, **Devices**,
//!   **Entities** and **Config entries**
//! - The **service call** shape (`kasa_helper.set_brightness`) and its
//!   target selectors
//! - Invariant enforcement: what counts as a supported dimmer, which
//!   brightness levels are valid
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod area;
pub mod brightness;
pub mod config_entry;
pub mod device;
pub mod entity;
pub mod service;
