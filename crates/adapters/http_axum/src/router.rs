//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use kasa_helper_app::ports::{
    AreaRegistry, ConfigEntryStore, DeviceConnector, DeviceRegistry, EntityRegistry,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and includes a [`TraceLayer`] that logs
/// each HTTP request/response through `tracing`.
pub fn build<AR, DR, ER, CS, DC>(state: AppState<AR, DR, ER, CS, DC>) -> Router
where
    AR: AreaRegistry + Send + Sync + 'static,
    DR: DeviceRegistry + Send + Sync + 'static,
    ER: EntityRegistry + Send + Sync + 'static,
    CS: ConfigEntryStore + Send + Sync + 'static,
    DC: DeviceConnector + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use kasa_helper_app::ports::{DeviceConnection, DeviceInfo, DimmerCapability};
    use kasa_helper_app::services::set_brightness::SetBrightnessHandler;
    use kasa_helper_domain::area::Area;
    use kasa_helper_domain::brightness::Brightness;
    use kasa_helper_domain::config_entry::{ConfigEntry, DeviceConfig};
    use kasa_helper_domain::device::Device;
    use kasa_helper_domain::entity::Entity;
    use kasa_helper_domain::error::KasaHelperError;
    use kasa_helper_domain::id::{AreaId, ConfigEntryId, DeviceId, FloorId, LabelId};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Two tplink dimmers: `light.kitchen` answers, `light.porch` does not.
    struct StubRegistry;

    fn entity(entity_id: &str, entry: &str) -> Entity {
        serde_json::from_value(json!({
            "id": entity_id,
            "entity_id": entity_id,
            "platform": "tplink",
            "config_entry_id": entry,
            "capabilities": { "supported_color_modes": ["brightness"] },
        }))
        .unwrap()
    }

    impl AreaRegistry for StubRegistry {
        async fn get_area(&self, _id: &AreaId) -> Result<Option<Area>, KasaHelperError> {
            Ok(None)
        }
        async fn areas_for_label(&self, _label: &LabelId) -> Result<Vec<Area>, KasaHelperError> {
            Ok(vec![])
        }
        async fn areas_for_floor(&self, _floor: &FloorId) -> Result<Vec<Area>, KasaHelperError> {
            Ok(vec![])
        }
    }

    impl DeviceRegistry for StubRegistry {
        async fn get_device(&self, _id: &DeviceId) -> Result<Option<Device>, KasaHelperError> {
            Ok(None)
        }
        async fn devices_for_label(
            &self,
            _label: &LabelId,
        ) -> Result<Vec<Device>, KasaHelperError> {
            Ok(vec![])
        }
        async fn devices_for_area(&self, _area: &AreaId) -> Result<Vec<Device>, KasaHelperError> {
            Ok(vec![])
        }
    }

    impl EntityRegistry for StubRegistry {
        async fn get_entity(&self, entity_id: &str) -> Result<Option<Entity>, KasaHelperError> {
            Ok(match entity_id {
                "light.kitchen" => Some(entity(entity_id, "entry_kitchen")),
                "light.porch" => Some(entity(entity_id, "entry_porch")),
                _ => None,
            })
        }
        async fn entities_for_label(
            &self,
            _label: &LabelId,
        ) -> Result<Vec<Entity>, KasaHelperError> {
            Ok(vec![])
        }
        async fn entities_for_area(&self, _area: &AreaId) -> Result<Vec<Entity>, KasaHelperError> {
            Ok(vec![])
        }
        async fn entities_for_device(
            &self,
            _device: &DeviceId,
        ) -> Result<Vec<Entity>, KasaHelperError> {
            Ok(vec![])
        }
    }

    impl ConfigEntryStore for StubRegistry {
        async fn get_entry(
            &self,
            id: &ConfigEntryId,
        ) -> Result<Option<ConfigEntry>, KasaHelperError> {
            let host = match id.as_str() {
                "entry_kitchen" => "10.0.0.1",
                "entry_porch" => "10.0.0.2",
                _ => return Ok(None),
            };
            Ok(Some(
                serde_json::from_value(json!({
                    "entry_id": id.as_str(),
                    "domain": "tplink",
                    "title": id.as_str(),
                    "data": { "host": host },
                }))
                .unwrap(),
            ))
        }
    }

    struct StubConnector;

    struct StubConnection {
        host: String,
    }

    impl DeviceConnector for StubConnector {
        type Connection = StubConnection;

        async fn connect(&self, config: &DeviceConfig) -> Result<StubConnection, KasaHelperError> {
            if config.host == "10.0.0.2" {
                return Err(KasaHelperError::Device("connection refused".into()));
            }
            Ok(StubConnection {
                host: config.host.clone(),
            })
        }
    }

    impl DeviceConnection for StubConnection {
        fn host(&self) -> &str {
            &self.host
        }
        fn model(&self) -> &str {
            "HS220"
        }
        fn capability(&self) -> DimmerCapability {
            DimmerCapability::LegacyDimmer
        }
        async fn set_brightness(&mut self, _level: Brightness) -> Result<(), KasaHelperError> {
            Ok(())
        }
        async fn get_device_info(&mut self) -> Result<DeviceInfo, KasaHelperError> {
            Ok(DeviceInfo {
                device_on: true,
                brightness: None,
            })
        }
        async fn set_device_info(
            &mut self,
            _level: Brightness,
            _device_on: bool,
        ) -> Result<(), KasaHelperError> {
            Ok(())
        }
    }

    fn app() -> Router {
        build(AppState::new(SetBrightnessHandler::new(
            StubRegistry,
            StubRegistry,
            StubRegistry,
            StubRegistry,
            StubConnector,
        )))
    }

    fn set_brightness(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/services/kasa_helper/set_brightness")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_report_each_contacted_device() {
        let response = app()
            .oneshot(set_brightness(
                r#"{"entity_id": ["light.kitchen", "light.porch"], "brightness": 40}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["brightness"], 40);
        assert_eq!(body["succeeded"], 1);
        assert_eq!(body["failed"], 1);

        let porch = body["devices"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["entry_id"] == "entry_porch")
            .unwrap();
        assert_eq!(porch["status"], "error");
        assert_eq!(porch["error"], "device error: connection refused");
    }

    #[tokio::test]
    async fn should_default_to_full_brightness() {
        let response = app()
            .oneshot(set_brightness(r#"{"entity_id": "light.kitchen"}"#))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["brightness"], 100);
        assert_eq!(body["devices"][0]["status"], "ok");
    }

    #[tokio::test]
    async fn should_succeed_with_nothing_targeted() {
        let response = app().oneshot(set_brightness("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["devices"], json!([]));
    }

    #[tokio::test]
    async fn should_reject_out_of_range_brightness() {
        let response = app()
            .oneshot(set_brightness(
                r#"{"entity_id": "light.kitchen", "brightness": 150}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("outside 0..=100"));
    }

    #[tokio::test]
    async fn should_reject_malformed_body() {
        let response = app().oneshot(set_brightness("{")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
