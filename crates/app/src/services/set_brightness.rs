//! `kasa_helper.set_brightness`: the service handler.
//!
//! Resolution runs to completion before any device is contacted, then the
//! dispatcher fans out to every owning device.

use kasa_helper_domain::error::KasaHelperError;
use kasa_helper_domain::service::SetBrightnessCall;

use crate::ports::{AreaRegistry, ConfigEntryStore, DeviceConnector, DeviceRegistry, EntityRegistry};
use crate::services::brightness_dispatcher::{BrightnessDispatcher, DispatchReport};
use crate::services::target_resolver::TargetResolver;

/// Handles `set_brightness` calls.
///
/// All collaborators are injected; registering the handler under its
/// service name is the composition root's job.
pub struct SetBrightnessHandler<AR, DR, ER, CS, DC> {
    resolver: TargetResolver<AR, DR, ER>,
    dispatcher: BrightnessDispatcher<CS, DC>,
}

impl<AR, DR, ER, CS, DC> SetBrightnessHandler<AR, DR, ER, CS, DC>
where
    AR: AreaRegistry + Sync,
    DR: DeviceRegistry + Sync,
    ER: EntityRegistry + Sync,
    CS: ConfigEntryStore + Sync,
    DC: DeviceConnector + Sync,
{
    /// Create a handler from the registry lookups and the device connector.
    pub fn new(areas: AR, devices: DR, entities: ER, entries: CS, connector: DC) -> Self {
        Self {
            resolver: TargetResolver::new(areas, devices, entities),
            dispatcher: BrightnessDispatcher::new(entries, connector),
        }
    }

    /// Resolve the call's targets and set their brightness.
    ///
    /// # Errors
    ///
    /// Returns an error when a registry lookup fails. Per-device failures
    /// are reported inside the returned [`DispatchReport`].
    #[tracing::instrument(skip(self, call), fields(brightness = %call.brightness))]
    pub async fn handle(&self, call: SetBrightnessCall) -> Result<DispatchReport, KasaHelperError> {
        let targets = self.resolver.resolve(&call.target).await?;
        if targets.is_empty() {
            tracing::info!("no supported dimmers targeted");
        }
        self.dispatcher.dispatch(&targets, call.brightness).await
    }
}
