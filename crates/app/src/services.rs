//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod brightness_control;
pub mod brightness_dispatcher;
pub mod set_brightness;
pub mod target_resolver;
