//! Target resolver: expands service selectors into supported dimmer entities.

use std::collections::{BTreeMap, BTreeSet};

use kasa_helper_domain::entity::Entity;
use kasa_helper_domain::error::KasaHelperError;
use kasa_helper_domain::id::{AreaId, DeviceId, EntityId};
use kasa_helper_domain::service::TargetSelector;

use crate::ports::{AreaRegistry, DeviceRegistry, EntityRegistry};

/// Resolved targets, keyed (and thereby deduplicated) by registry id.
pub type ResolvedTargets = BTreeMap<EntityId, Entity>;

/// Expands label → floor/area → device → entity selectors through the host
/// registries.
pub struct TargetResolver<AR, DR, ER> {
    areas: AR,
    devices: DR,
    entities: ER,
}

impl<AR, DR, ER> TargetResolver<AR, DR, ER>
where
    AR: AreaRegistry + Sync,
    DR: DeviceRegistry + Sync,
    ER: EntityRegistry + Sync,
{
    /// Create a resolver backed by the given registries.
    pub fn new(areas: AR, devices: DR, entities: ER) -> Self {
        Self {
            areas,
            devices,
            entities,
        }
    }

    /// Resolve `target` to the supported dimmers it reaches.
    ///
    /// Selectors that match nothing are ignored; an empty selector yields an
    /// empty map.
    ///
    /// # Errors
    ///
    /// Returns any error raised by a registry lookup.
    #[tracing::instrument(skip(self, target))]
    pub async fn resolve(
        &self,
        target: &TargetSelector,
    ) -> Result<ResolvedTargets, KasaHelperError> {
        let areas = self.resolve_areas(target).await?;
        let devices = self.resolve_devices(target, &areas).await?;
        let mut entities = self.resolve_entities(target, &areas, &devices).await?;

        let reached = entities.len();
        entities.retain(|_, entity| entity.is_supported_dimmer());

        tracing::debug!(
            areas = areas.len(),
            devices = devices.len(),
            entities = reached,
            dimmers = entities.len(),
            "targets resolved"
        );
        Ok(entities)
    }

    async fn resolve_areas(
        &self,
        target: &TargetSelector,
    ) -> Result<BTreeSet<AreaId>, KasaHelperError> {
        let mut areas = BTreeSet::new();
        for label in &target.label_id {
            areas.extend(
                self.areas
                    .areas_for_label(label)
                    .await?
                    .into_iter()
                    .map(|area| area.id),
            );
        }
        for floor in &target.floor_id {
            areas.extend(
                self.areas
                    .areas_for_floor(floor)
                    .await?
                    .into_iter()
                    .map(|area| area.id),
            );
        }
        for id in &target.area_id {
            if let Some(area) = self.areas.get_area(id).await? {
                areas.insert(area.id);
            }
        }
        Ok(areas)
    }

    async fn resolve_devices(
        &self,
        target: &TargetSelector,
        areas: &BTreeSet<AreaId>,
    ) -> Result<BTreeSet<DeviceId>, KasaHelperError> {
        let mut devices = BTreeSet::new();
        for label in &target.label_id {
            devices.extend(
                self.devices
                    .devices_for_label(label)
                    .await?
                    .into_iter()
                    .map(|device| device.id),
            );
        }
        for area in areas {
            devices.extend(
                self.devices
                    .devices_for_area(area)
                    .await?
                    .into_iter()
                    .map(|device| device.id),
            );
        }
        for id in &target.device_id {
            if let Some(device) = self.devices.get_device(id).await? {
                devices.insert(device.id);
            }
        }
        Ok(devices)
    }

    async fn resolve_entities(
        &self,
        target: &TargetSelector,
        areas: &BTreeSet<AreaId>,
        devices: &BTreeSet<DeviceId>,
    ) -> Result<ResolvedTargets, KasaHelperError> {
        let mut entities = ResolvedTargets::new();
        let mut insert = |found: Vec<Entity>| {
            for entity in found {
                entities.insert(entity.id.clone(), entity);
            }
        };

        for label in &target.label_id {
            insert(self.entities.entities_for_label(label).await?);
        }
        for area in areas {
            insert(self.entities.entities_for_area(area).await?);
        }
        for device in devices {
            insert(self.entities.entities_for_device(device).await?);
        }
        for entity_id in &target.entity_id {
            if let Some(entity) = self.entities.get_entity(entity_id).await? {
                insert(vec![entity]);
            }
        }
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use kasa_helper_domain::area::Area;
    use kasa_helper_domain::device::Device;
    use kasa_helper_domain::entity::{Capabilities, TPLINK_PLATFORM};
    use kasa_helper_domain::id::{ConfigEntryId, FloorId, LabelId};

    use crate::testing::InMemoryRegistry;

    type Resolver =
        TargetResolver<Arc<InMemoryRegistry>, Arc<InMemoryRegistry>, Arc<InMemoryRegistry>>;

    fn resolver(registry: InMemoryRegistry) -> Resolver {
        let registry = Arc::new(registry);
        TargetResolver::new(
            Arc::clone(&registry),
            Arc::clone(&registry),
            Arc::clone(&registry),
        )
    }

    fn area(id: &str, floor: Option<&str>, labels: &[&str]) -> Area {
        let mut builder = Area::builder().id(AreaId::new(id).unwrap());
        if let Some(floor) = floor {
            builder = builder.floor_id(FloorId::new(floor).unwrap());
        }
        for label in labels {
            builder = builder.label(LabelId::new(*label).unwrap());
        }
        builder.build().unwrap()
    }

    fn device(id: &str, area: Option<&str>, labels: &[&str]) -> Device {
        let mut builder = Device::builder().id(DeviceId::new(id).unwrap());
        if let Some(area) = area {
            builder = builder.area_id(AreaId::new(area).unwrap());
        }
        for label in labels {
            builder = builder.label(LabelId::new(*label).unwrap());
        }
        builder.build().unwrap()
    }

    fn dimmer(id: &str, device: Option<&str>, area: Option<&str>) -> Entity {
        let mut builder = Entity::builder()
            .id(EntityId::new(id).unwrap())
            .entity_id(format!("light.{id}"))
            .platform(TPLINK_PLATFORM)
            .config_entry_id(ConfigEntryId::new(format!("entry_{id}")).unwrap())
            .capabilities(Capabilities::with_color_modes(["brightness"]));
        if let Some(device) = device {
            builder = builder.device_id(DeviceId::new(device).unwrap());
        }
        if let Some(area) = area {
            builder = builder.area_id(AreaId::new(area).unwrap());
        }
        builder.build().unwrap()
    }

    fn with_label(mut entity: Entity, label: &str) -> Entity {
        entity.labels.insert(LabelId::new(label).unwrap());
        entity
    }

    /// Two floors, three areas, a mix of dimmers and non-dimmers.
    fn house() -> InMemoryRegistry {
        let mut plug = dimmer("plug", Some("dev_plug"), None);
        plug.entity_id = "switch.plug".to_string();
        let mut hue = dimmer("hue", None, Some("kitchen"));
        hue.platform = "hue".to_string();
        let mut onoff = dimmer("onoff", None, Some("kitchen"));
        onoff.capabilities = Some(Capabilities::with_color_modes(["onoff"]));

        InMemoryRegistry {
            areas: vec![
                area("kitchen", Some("ground"), &[]),
                area("living", Some("ground"), &["cosy"]),
                area("bedroom", Some("upstairs"), &[]),
            ],
            devices: vec![
                device("dev_kitchen", Some("kitchen"), &[]),
                device("dev_bedroom", Some("bedroom"), &["night"]),
                device("dev_plug", Some("kitchen"), &[]),
                device("dev_loose", None, &[]),
            ],
            entities: vec![
                dimmer("kitchen_dimmer", Some("dev_kitchen"), None),
                dimmer("kitchen_ceiling", None, Some("kitchen")),
                dimmer("living_lamp", None, Some("living")),
                dimmer("bedroom_dimmer", Some("dev_bedroom"), None),
                with_label(dimmer("hall", None, None), "night"),
                dimmer("loose", Some("dev_loose"), None),
                plug,
                hue,
                onoff,
            ],
            ..InMemoryRegistry::default()
        }
    }

    fn ids(targets: &ResolvedTargets) -> Vec<&str> {
        targets.keys().map(EntityId::as_str).collect()
    }

    #[tokio::test]
    async fn should_return_empty_map_for_empty_selector() {
        let resolver = resolver(house());
        let targets = resolver.resolve(&TargetSelector::default()).await.unwrap();
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn should_expand_area_to_device_and_direct_entities() {
        let resolver = resolver(house());
        let target = TargetSelector {
            area_id: vec![AreaId::new("kitchen").unwrap()],
            ..TargetSelector::default()
        };

        let targets = resolver.resolve(&target).await.unwrap();
        assert_eq!(ids(&targets), vec!["kitchen_ceiling", "kitchen_dimmer"]);
    }

    #[tokio::test]
    async fn should_expand_floor_through_areas() {
        let resolver = resolver(house());
        let target = TargetSelector {
            floor_id: vec![FloorId::new("ground").unwrap()],
            ..TargetSelector::default()
        };

        let targets = resolver.resolve(&target).await.unwrap();
        assert_eq!(
            ids(&targets),
            vec!["kitchen_ceiling", "kitchen_dimmer", "living_lamp"]
        );
    }

    #[tokio::test]
    async fn should_expand_label_on_areas_devices_and_entities() {
        let resolver = resolver(house());
        let target = TargetSelector {
            label_id: vec![
                LabelId::new("cosy").unwrap(),
                LabelId::new("night").unwrap(),
            ],
            ..TargetSelector::default()
        };

        let targets = resolver.resolve(&target).await.unwrap();
        assert_eq!(ids(&targets), vec!["bedroom_dimmer", "hall", "living_lamp"]);
    }

    #[tokio::test]
    async fn should_include_explicit_devices_and_entities() {
        let resolver = resolver(house());
        let target = TargetSelector {
            device_id: vec![DeviceId::new("dev_loose").unwrap()],
            entity_id: vec!["light.hall".to_string()],
            ..TargetSelector::default()
        };

        let targets = resolver.resolve(&target).await.unwrap();
        assert_eq!(ids(&targets), vec!["hall", "loose"]);
    }

    #[tokio::test]
    async fn should_ignore_unknown_selectors() {
        let resolver = resolver(house());
        let target = TargetSelector {
            label_id: vec![LabelId::new("nope").unwrap()],
            floor_id: vec![FloorId::new("basement").unwrap()],
            area_id: vec![AreaId::new("garage").unwrap()],
            device_id: vec![DeviceId::new("ghost").unwrap()],
            entity_id: vec!["light.ghost".to_string()],
        };

        let targets = resolver.resolve(&target).await.unwrap();
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn should_deduplicate_entities_reached_several_ways() {
        let resolver = resolver(house());
        let target = TargetSelector {
            floor_id: vec![FloorId::new("ground").unwrap()],
            area_id: vec![
                AreaId::new("kitchen").unwrap(),
                AreaId::new("kitchen").unwrap(),
            ],
            device_id: vec![DeviceId::new("dev_kitchen").unwrap()],
            entity_id: vec![
                "light.kitchen_dimmer".to_string(),
                "kitchen_dimmer".to_string(),
            ],
            ..TargetSelector::default()
        };

        let targets = resolver.resolve(&target).await.unwrap();
        assert_eq!(
            ids(&targets),
            vec!["kitchen_ceiling", "kitchen_dimmer", "living_lamp"]
        );
    }

    #[tokio::test]
    async fn should_only_keep_supported_dimmers() {
        let resolver = resolver(house());
        let target = TargetSelector {
            entity_id: vec![
                "switch.plug".to_string(),
                "light.hue".to_string(),
                "light.onoff".to_string(),
            ],
            ..TargetSelector::default()
        };

        let targets = resolver.resolve(&target).await.unwrap();
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn should_resolve_identically_when_called_twice() {
        let resolver = resolver(house());
        let target = TargetSelector {
            floor_id: vec![FloorId::new("ground").unwrap()],
            label_id: vec![LabelId::new("night").unwrap()],
            ..TargetSelector::default()
        };

        let first = resolver.resolve(&target).await.unwrap();
        let second = resolver.resolve(&target).await.unwrap();
        assert_eq!(first, second);
        assert!(first.values().all(Entity::is_supported_dimmer));
    }

    #[tokio::test]
    async fn should_propagate_registry_failure() {
        let resolver = resolver(InMemoryRegistry {
            fail_lookups: true,
            ..house()
        });
        let target = TargetSelector {
            area_id: vec![AreaId::new("kitchen").unwrap()],
            ..TargetSelector::default()
        };

        let result = resolver.resolve(&target).await;
        assert!(matches!(result, Err(KasaHelperError::Registry(_))));
    }
}
