//! Service call handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use kasa_helper_app::ports::{
    AreaRegistry, ConfigEntryStore, DeviceConnector, DeviceRegistry, EntityRegistry,
};
use kasa_helper_app::services::brightness_dispatcher::{DeviceOutcome, DispatchReport};
use kasa_helper_domain::service::SetBrightnessCall;

use crate::error::{ApiError, error_chain};
use crate::state::AppState;

/// Outcome for one contacted device.
#[derive(Debug, Serialize)]
pub struct DeviceOutcomeBody {
    pub entry_id: String,
    pub title: String,
    pub host: Option<String>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    Error,
}

impl From<&DeviceOutcome> for DeviceOutcomeBody {
    fn from(outcome: &DeviceOutcome) -> Self {
        let (status, error) = match &outcome.result {
            Ok(()) => (OutcomeStatus::Ok, None),
            Err(err) => (OutcomeStatus::Error, Some(error_chain(err))),
        };
        Self {
            entry_id: outcome.entry_id.to_string(),
            title: outcome.title.clone(),
            host: outcome.host.clone(),
            status,
            error,
        }
    }
}

/// Body returned by `set_brightness`.
#[derive(Debug, Serialize)]
pub struct SetBrightnessBody {
    pub brightness: u8,
    pub succeeded: usize,
    pub failed: usize,
    pub devices: Vec<DeviceOutcomeBody>,
}

impl From<&DispatchReport> for SetBrightnessBody {
    fn from(report: &DispatchReport) -> Self {
        Self {
            brightness: report.brightness.percent(),
            succeeded: report.succeeded().count(),
            failed: report.failed().count(),
            devices: report.outcomes.iter().map(DeviceOutcomeBody::from).collect(),
        }
    }
}

/// Possible responses from the `set_brightness` endpoint.
pub enum SetBrightnessResponse {
    Ok(Json<SetBrightnessBody>),
}

impl IntoResponse for SetBrightnessResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/services/kasa_helper/set_brightness`
///
/// Per-device failures are reported in the body with a `200`; only a failed
/// lookup or a malformed request fails the call.
pub async fn set_brightness<AR, DR, ER, CS, DC>(
    State(state): State<AppState<AR, DR, ER, CS, DC>>,
    body: Result<Json<SetBrightnessCall>, JsonRejection>,
) -> Result<SetBrightnessResponse, ApiError>
where
    AR: AreaRegistry + Send + Sync + 'static,
    DR: DeviceRegistry + Send + Sync + 'static,
    ER: EntityRegistry + Send + Sync + 'static,
    CS: ConfigEntryStore + Send + Sync + 'static,
    DC: DeviceConnector + Send + Sync + 'static,
{
    let Json(call) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let report = state.set_brightness.handle(call).await?;
    Ok(SetBrightnessResponse::Ok(Json(SetBrightnessBody::from(&report))))
}
