//! Capability metadata declared by an entity at registration time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SUPPORTED_COLOR_MODES: &str = "supported_color_modes";

/// Free-form capability map as stored in the entity registry.
///
/// Only `supported_color_modes` is interpreted; other keys are carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(Map<String, Value>);

impl Capabilities {
    /// Build a capability map advertising the given color modes.
    #[must_use]
    pub fn with_color_modes<I, S>(modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modes = modes
            .into_iter()
            .map(|mode| Value::String(mode.into()))
            .collect();
        let mut map = Map::new();
        map.insert(SUPPORTED_COLOR_MODES.to_string(), Value::Array(modes));
        Self(map)
    }

    /// Color modes listed under `supported_color_modes`, skipping non-strings.
    pub fn supported_color_modes(&self) -> impl Iterator<Item = &str> {
        self.0
            .get(SUPPORTED_COLOR_MODES)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// Whether `mode` is one of the supported color modes.
    #[must_use]
    pub fn supports_color_mode(&self, mode: &str) -> bool {
        self.supported_color_modes().any(|m| m == mode)
    }

    /// Raw access to a capability value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}
