//! Area: a logical grouping (room, zone) for devices and entities.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{AreaId, FloorId, LabelId};

/// A room or zone as known to the host's area registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    pub floor_id: Option<FloorId>,
    #[serde(default)]
    pub labels: BTreeSet<LabelId>,
}

impl Area {
    /// Create a builder for constructing an [`Area`].
    #[must_use]
    pub fn builder() -> AreaBuilder {
        AreaBuilder::default()
    }

    /// Whether the area sits on `floor`.
    #[must_use]
    pub fn is_on_floor(&self, floor: &FloorId) -> bool {
        self.floor_id.as_ref() == Some(floor)
    }

    /// Whether the area carries `label`.
    #[must_use]
    pub fn has_label(&self, label: &LabelId) -> bool {
        self.labels.contains(label)
    }
}

/// Step-by-step builder for [`Area`].
#[derive(Debug, Default)]
pub struct AreaBuilder {
    id: Option<AreaId>,
    name: Option<String>,
    floor_id: Option<FloorId>,
    labels: BTreeSet<LabelId>,
}

impl AreaBuilder {
    #[must_use]
    pub fn id(mut self, id: AreaId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn floor_id(mut self, floor_id: FloorId) -> Self {
        self.floor_id = Some(floor_id);
        self
    }

    #[must_use]
    pub fn label(mut self, label: LabelId) -> Self {
        self.labels.insert(label);
        self
    }

    /// Consume the builder and return an [`Area`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] if no id was given.
    pub fn build(self) -> Result<Area, ValidationError> {
        let id = self.id.ok_or(ValidationError::EmptyId)?;
        Ok(Area {
            name: self.name.unwrap_or_else(|| id.to_string()),
            id,
            floor_id: self.floor_id,
            labels: self.labels,
        })
    }
}
