//! Brightness level accepted by the `set_brightness` service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Brightness percentage in `0..=100`.
///
/// Defaults to 100, matching the service default when the caller omits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Validate and wrap a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BrightnessOutOfRange`] outside `0..=100`.
    pub fn new(level: i64) -> Result<Self, ValidationError> {
        u8::try_from(level)
            .ok()
            .filter(|level| *level <= Self::MAX.0)
            .map(Self)
            .ok_or(ValidationError::BrightnessOutOfRange(level))
    }

    /// The percentage as an integer.
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// The percentage with 0 raised to 1.
    ///
    /// Dimmers treat 0 as "off"; sending 1 keeps them dim without toggling power.
    #[must_use]
    pub fn non_zero_percent(self) -> u8 {
        self.0.max(1)
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<i64> for Brightness {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
