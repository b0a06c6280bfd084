//! Device: a physical thing that exposes one or more entities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{AreaId, ConfigEntryId, DeviceId, LabelId};

/// A device as known to the host's device registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: Option<String>,
    pub area_id: Option<AreaId>,
    #[serde(default)]
    pub labels: BTreeSet<LabelId>,
    #[serde(default)]
    pub config_entries: BTreeSet<ConfigEntryId>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Whether the device is assigned to `area`.
    #[must_use]
    pub fn is_in_area(&self, area: &AreaId) -> bool {
        self.area_id.as_ref() == Some(area)
    }

    /// Whether the device carries `label`.
    #[must_use]
    pub fn has_label(&self, label: &LabelId) -> bool {
        self.labels.contains(label)
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    area_id: Option<AreaId>,
    labels: BTreeSet<LabelId>,
    config_entries: BTreeSet<ConfigEntryId>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn area_id(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    #[must_use]
    pub fn label(mut self, label: LabelId) -> Self {
        self.labels.insert(label);
        self
    }

    #[must_use]
    pub fn config_entry(mut self, entry: ConfigEntryId) -> Self {
        self.config_entries.insert(entry);
        self
    }

    /// Consume the builder and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] if no id was given.
    pub fn build(self) -> Result<Device, ValidationError> {
        Ok(Device {
            id: self.id.ok_or(ValidationError::EmptyId)?,
            name: self.name,
            area_id: self.area_id,
            labels: self.labels,
            config_entries: self.config_entries,
        })
    }
}
