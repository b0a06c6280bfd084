//! `SMART.*` request dialect: `{"method", "params"}` requests answered
//! with `{"error_code", "result"}`.

use serde::Deserialize;
use serde_json::{Value, json};

use kasa_helper_app::ports::DimmerCapability;

use crate::error::KasaError;

pub(crate) const COMPONENT_NEGO: &str = "component_nego";
pub(crate) const GET_DEVICE_INFO: &str = "get_device_info";
pub(crate) const SET_DEVICE_INFO: &str = "set_device_info";

const BRIGHTNESS_COMPONENT: &str = "brightness";

pub(crate) fn request(method: &str) -> Value {
    json!({ "method": method })
}

pub(crate) fn set_device_info(brightness: u8, device_on: bool) -> Value {
    json!({
        "method": SET_DEVICE_INFO,
        "params": { "brightness": brightness, "device_on": device_on },
    })
}

/// Take the `result` of a response, failing on a non-zero `error_code`.
pub(crate) fn result(method: &'static str, response: Value) -> Result<Value, KasaError> {
    match response.get("error_code").and_then(Value::as_i64) {
        Some(0) => Ok(response.get("result").cloned().unwrap_or(Value::Null)),
        Some(code) => Err(KasaError::Device { method, code }),
        None => Err(KasaError::MalformedResponse {
            method,
            field: "error_code",
        }),
    }
}

#[derive(Debug, Deserialize)]
struct Component {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ComponentList {
    #[serde(default)]
    component_list: Vec<Component>,
}

/// Capability from a `component_nego` result.
pub(crate) fn capability(components: Value) -> Result<DimmerCapability, KasaError> {
    let list = ComponentList::deserialize(components)?;
    let dimmable = list
        .component_list
        .iter()
        .any(|component| component.id == BRIGHTNESS_COMPONENT);
    Ok(if dimmable {
        DimmerCapability::BrightnessModule
    } else {
        DimmerCapability::Unsupported
    })
}

/// The subset of `get_device_info` this adapter looks at.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SmartDeviceInfo {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub device_on: bool,
    #[serde(default)]
    pub brightness: Option<u8>,
}
