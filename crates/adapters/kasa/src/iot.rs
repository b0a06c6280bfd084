//! Legacy `IOT.*` request dialect: `{"<module>": {"<method>": {params}}}`
//! with an `err_code` in every method result.

use serde::Deserialize;
use serde_json::{Value, json};

use kasa_helper_app::ports::DimmerCapability;

use crate::error::KasaError;

const SYSTEM: &str = "system";
const GET_SYSINFO: &str = "get_sysinfo";
const DIMMER: &str = "smartlife.iot.dimmer";
const SET_BRIGHTNESS: &str = "set_brightness";

pub(crate) fn get_sysinfo() -> Value {
    json!({ SYSTEM: { GET_SYSINFO: {} } })
}

pub(crate) fn set_brightness(level: u8) -> Value {
    json!({ DIMMER: { SET_BRIGHTNESS: { "brightness": level } } })
}

/// Extract `response[module][method]`, failing on a non-zero `err_code`.
fn method_result<'a>(
    response: &'a Value,
    module: &str,
    method: &'static str,
) -> Result<&'a Value, KasaError> {
    let result = response
        .get(module)
        .and_then(|m| m.get(method))
        .ok_or(KasaError::MalformedResponse {
            method,
            field: "result",
        })?;
    match result.get("err_code").and_then(Value::as_i64) {
        Some(0) | None => Ok(result),
        Some(code) => Err(KasaError::Device { method, code }),
    }
}

/// The subset of `get_sysinfo` this adapter looks at.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SysInfo {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub dev_name: String,
    #[serde(default)]
    pub relay_state: Option<u8>,
    #[serde(default)]
    pub brightness: Option<u8>,
}

impl SysInfo {
    pub(crate) fn from_response(response: &Value) -> Result<Self, KasaError> {
        let result = method_result(response, SYSTEM, GET_SYSINFO)?;
        Ok(Self::deserialize(result)?)
    }

    /// Legacy devices are dimmers when their `dev_name` says so, whatever
    /// their reported type.
    pub(crate) fn capability(&self) -> DimmerCapability {
        if self.dev_name.contains("Dimmer") {
            DimmerCapability::LegacyDimmer
        } else {
            DimmerCapability::Unsupported
        }
    }

    pub(crate) fn is_on(&self) -> bool {
        self.relay_state == Some(1)
    }
}

pub(crate) fn check_set_brightness(response: &Value) -> Result<(), KasaError> {
    method_result(response, DIMMER, SET_BRIGHTNESS).map(|_| ())
}
