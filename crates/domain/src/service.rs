//! Service: the command exposed by this integration.
//!
//! `kasa_helper.set_brightness` carries host-style target selectors plus the
//! brightness to apply.

use serde::{Deserialize, Deserializer, Serialize};

use crate::brightness::Brightness;
use crate::id::{AreaId, DeviceId, FloorId, LabelId};

/// Namespace the service is registered under.
pub const SERVICE_DOMAIN: &str = "kasa_helper";

/// Name of the only service this integration provides.
pub const SET_BRIGHTNESS: &str = "set_brightness";

/// Heterogeneous target selectors, each optional.
///
/// Every field accepts either a single id or a list of ids. Duplicates are
/// allowed; resolution deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSelector {
    #[serde(deserialize_with = "one_or_many")]
    pub label_id: Vec<LabelId>,
    #[serde(deserialize_with = "one_or_many")]
    pub floor_id: Vec<FloorId>,
    #[serde(deserialize_with = "one_or_many")]
    pub area_id: Vec<AreaId>,
    #[serde(deserialize_with = "one_or_many")]
    pub device_id: Vec<DeviceId>,
    /// User-facing entity ids (`light.kitchen`); registry ids are accepted too.
    #[serde(deserialize_with = "one_or_many")]
    pub entity_id: Vec<String>,
}

impl TargetSelector {
    /// Whether no selector was given at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label_id.is_empty()
            && self.floor_id.is_empty()
            && self.area_id.is_empty()
            && self.device_id.is_empty()
            && self.entity_id.is_empty()
    }
}

/// Payload of a `kasa_helper.set_brightness` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBrightnessCall {
    #[serde(flatten)]
    pub target: TargetSelector,
    #[serde(default)]
    pub brightness: Brightness,
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        One(T),
        Many(Vec<T>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn should_default_to_empty_target_and_full_brightness() {
        let call: SetBrightnessCall = serde_json::from_str("{}").unwrap();
        assert!(call.target.is_empty());
        assert_eq!(call.brightness, Brightness::MAX);
    }

    #[test]
    fn should_accept_lists_for_every_selector() {
        let call: SetBrightnessCall = serde_json::from_str(
            r#"{
                "label_id": ["cosy"],
                "floor_id": ["ground"],
                "area_id": ["kitchen", "kitchen"],
                "device_id": ["d1"],
                "entity_id": ["light.desk"],
                "brightness": 50
            }"#,
        )
        .unwrap();

        assert_eq!(call.target.label_id, vec![LabelId::new("cosy").unwrap()]);
        assert_eq!(call.target.floor_id, vec![FloorId::new("ground").unwrap()]);
        assert_eq!(call.target.area_id.len(), 2);
        assert_eq!(call.target.device_id, vec![DeviceId::new("d1").unwrap()]);
        assert_eq!(call.target.entity_id, vec!["light.desk".to_string()]);
        assert_eq!(call.brightness.percent(), 50);
    }

    #[test]
    fn should_accept_single_string_selector() {
        let call: SetBrightnessCall =
            serde_json::from_str(r#"{"area_id": "kitchen", "brightness": 10}"#).unwrap();
        assert_eq!(call.target.area_id, vec![AreaId::new("kitchen").unwrap()]);
    }

    #[test]
    fn should_reject_out_of_range_brightness() {
        let result: Result<SetBrightnessCall, _> =
            serde_json::from_str(r#"{"brightness": 101}"#);
        let err = result.unwrap_err();
        assert!(
            err.to_string()
                .contains(&ValidationError::BrightnessOutOfRange(101).to_string())
        );
    }
}
