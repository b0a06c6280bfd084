//! JSON API handler modules, mounted under `/api`.

#[allow(clippy::missing_errors_doc)]
pub mod services;

use axum::Router;
use axum::routing::post;

use kasa_helper_app::ports::{
    AreaRegistry, ConfigEntryStore, DeviceConnector, DeviceRegistry, EntityRegistry,
};
use kasa_helper_domain::service::{SERVICE_DOMAIN, SET_BRIGHTNESS};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<AR, DR, ER, CS, DC>() -> Router<AppState<AR, DR, ER, CS, DC>>
where
    AR: AreaRegistry + Send + Sync + 'static,
    DR: DeviceRegistry + Send + Sync + 'static,
    ER: EntityRegistry + Send + Sync + 'static,
    CS: ConfigEntryStore + Send + Sync + 'static,
    DC: DeviceConnector + Send + Sync + 'static,
{
    Router::new().route(
        &format!("/services/{SERVICE_DOMAIN}/{SET_BRIGHTNESS}"),
        post(services::set_brightness::<AR, DR, ER, CS, DC>),
    )
}
