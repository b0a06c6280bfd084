//! Typed identifier newtypes.
//!
//! The host registries hand out opaque string identifiers (area slugs,
//! 32-char hex ids, ...). Wrapping them keeps an area id from being passed
//! where a device id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier, rejecting the empty string.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyId`] when `value` is empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ValidationError::EmptyId);
                }
                Ok(Self(value))
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of an [`Area`](crate::area::Area).
    AreaId
);

define_id!(
    /// Identifier of a floor. Floors only exist here as a grouping key on areas.
    FloorId
);

define_id!(
    /// Identifier of a label attached to areas, devices or entities.
    LabelId
);

define_id!(
    /// Identifier of a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Registry identifier of an [`Entity`](crate::entity::Entity).
    ///
    /// Distinct from the user-facing `light.kitchen` style entity id.
    EntityId
);

define_id!(
    /// Identifier of a [`ConfigEntry`](crate::config_entry::ConfigEntry).
    ConfigEntryId
);
