//! Shared application state for axum handlers.

use std::sync::Arc;

use kasa_helper_app::ports::{
    AreaRegistry, ConfigEntryStore, DeviceConnector, DeviceRegistry, EntityRegistry,
};
use kasa_helper_app::services::set_brightness::SetBrightnessHandler;

/// Application state shared across all axum handlers.
///
/// Generic over the registry lookups and the device connector to avoid
/// dynamic dispatch. `Clone` is implemented manually so only the `Arc` is
/// cloned.
pub struct AppState<AR, DR, ER, CS, DC> {
    /// The `kasa_helper.set_brightness` handler.
    pub set_brightness: Arc<SetBrightnessHandler<AR, DR, ER, CS, DC>>,
}

impl<AR, DR, ER, CS, DC> Clone for AppState<AR, DR, ER, CS, DC> {
    fn clone(&self) -> Self {
        Self {
            set_brightness: Arc::clone(&self.set_brightness),
        }
    }
}

impl<AR, DR, ER, CS, DC> AppState<AR, DR, ER, CS, DC>
where
    AR: AreaRegistry + Send + Sync + 'static,
    DR: DeviceRegistry + Send + Sync + 'static,
    ER: EntityRegistry + Send + Sync + 'static,
    CS: ConfigEntryStore + Send + Sync + 'static,
    DC: DeviceConnector + Send + Sync + 'static,
{
    pub fn new(set_brightness: SetBrightnessHandler<AR, DR, ER, CS, DC>) -> Self {
        Self {
            set_brightness: Arc::new(set_brightness),
        }
    }
}
