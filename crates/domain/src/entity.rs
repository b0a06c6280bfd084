//! Entity: a single observable/controllable aspect of a device.
//!
//! Only the registry view is modelled here (ids, ownership, capabilities);
//! live state belongs to the host and is never read by this integration.

mod capabilities;

pub use capabilities::Capabilities;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{AreaId, ConfigEntryId, DeviceId, EntityId, LabelId};

/// Entity domain handled by this integration.
pub const LIGHT_DOMAIN: &str = "light";

/// Platform tag of the TP-Link integration that owns the dimmers.
pub const TPLINK_PLATFORM: &str = "tplink";

/// Color mode advertised by lights that can be dimmed.
pub const BRIGHTNESS_COLOR_MODE: &str = "brightness";

/// An entity as known to the host's entity registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Registry identifier (stable across renames).
    pub id: EntityId,
    /// User-facing id, e.g. `light.kitchen_dimmer`.
    pub entity_id: String,
    /// Integration that created the entity, e.g. `tplink`.
    pub platform: String,
    pub device_id: Option<DeviceId>,
    pub area_id: Option<AreaId>,
    pub config_entry_id: Option<ConfigEntryId>,
    #[serde(default)]
    pub labels: BTreeSet<LabelId>,
    pub capabilities: Option<Capabilities>,
}

impl Entity {
    /// Create a builder for constructing an [`Entity`].
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    /// The domain part of `entity_id` (`light` for `light.kitchen`).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.entity_id
            .split_once('.')
            .map_or(self.entity_id.as_str(), |(domain, _)| domain)
    }

    /// Whether this entity is a TP-Link light that advertises brightness.
    #[must_use]
    pub fn is_supported_dimmer(&self) -> bool {
        self.domain() == LIGHT_DOMAIN
            && self.platform == TPLINK_PLATFORM
            && self
                .capabilities
                .as_ref()
                .is_some_and(|caps| caps.supports_color_mode(BRIGHTNESS_COLOR_MODE))
    }

    /// Whether the entity is directly assigned to `area`.
    #[must_use]
    pub fn is_in_area(&self, area: &AreaId) -> bool {
        self.area_id.as_ref() == Some(area)
    }

    /// Whether the entity belongs to `device`.
    #[must_use]
    pub fn belongs_to(&self, device: &DeviceId) -> bool {
        self.device_id.as_ref() == Some(device)
    }

    /// Whether the entity carries `label`.
    #[must_use]
    pub fn has_label(&self, label: &LabelId) -> bool {
        self.labels.contains(label)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedEntityId`] unless `entity_id` has
    /// a non-empty domain and object id separated by a dot.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.entity_id.split_once('.') {
            Some((domain, object_id)) if !domain.is_empty() && !object_id.is_empty() => Ok(()),
            _ => Err(ValidationError::MalformedEntityId(self.entity_id.clone())),
        }
    }
}

/// Step-by-step builder for [`Entity`].
#[derive(Debug, Default)]
pub struct EntityBuilder {
    id: Option<EntityId>,
    entity_id: Option<String>,
    platform: Option<String>,
    device_id: Option<DeviceId>,
    area_id: Option<AreaId>,
    config_entry_id: Option<ConfigEntryId>,
    labels: BTreeSet<LabelId>,
    capabilities: Option<Capabilities>,
}

impl EntityBuilder {
    #[must_use]
    pub fn id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn area_id(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    #[must_use]
    pub fn config_entry_id(mut self, config_entry_id: ConfigEntryId) -> Self {
        self.config_entry_id = Some(config_entry_id);
        self
    }

    #[must_use]
    pub fn label(mut self, label: LabelId) -> Self {
        self.labels.insert(label);
        self
    }

    #[must_use]
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Consume the builder, validate, and return an [`Entity`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] if no registry id was given, or
    /// [`ValidationError::MalformedEntityId`] if `entity_id` is malformed.
    pub fn build(self) -> Result<Entity, ValidationError> {
        let entity = Entity {
            id: self.id.ok_or(ValidationError::EmptyId)?,
            entity_id: self.entity_id.unwrap_or_default(),
            platform: self.platform.unwrap_or_default(),
            device_id: self.device_id,
            area_id: self.area_id,
            config_entry_id: self.config_entry_id,
            labels: self.labels,
            capabilities: self.capabilities,
        };
        entity.validate()?;
        Ok(entity)
    }
}
