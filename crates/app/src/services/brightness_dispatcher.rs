//! Brightness dispatcher: fans a brightness change out to physical devices.
//!
//! Every device gets its own connection and its own outcome. A failure on one
//! device never cancels the others; the caller receives a [`DispatchReport`]
//! listing what happened where.

use std::collections::BTreeMap;

use futures::future::join_all;
use kasa_helper_domain::brightness::Brightness;
use kasa_helper_domain::config_entry::{ConfigEntry, DeviceConfig};
use kasa_helper_domain::error::KasaHelperError;
use kasa_helper_domain::id::ConfigEntryId;

use crate::ports::{ConfigEntryStore, DeviceConnector};
use crate::services::brightness_control::{BrightnessControl, PowerPreservingBrightness};
use crate::services::target_resolver::ResolvedTargets;

/// Result of dispatching to one device.
#[derive(Debug)]
pub struct DeviceOutcome {
    pub entry_id: ConfigEntryId,
    pub title: String,
    pub host: Option<String>,
    pub result: Result<(), KasaHelperError>,
}

impl DeviceOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate result of one `set_brightness` invocation.
#[derive(Debug)]
pub struct DispatchReport {
    pub brightness: Brightness,
    pub outcomes: Vec<DeviceOutcome>,
}

impl DispatchReport {
    /// Outcomes that completed without error.
    pub fn succeeded(&self) -> impl Iterator<Item = &DeviceOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Outcomes that failed.
    pub fn failed(&self) -> impl Iterator<Item = &DeviceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Whether every contacted device succeeded (vacuously true when none were).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(DeviceOutcome::is_success)
    }
}

/// Maps resolved entities to their config entries and sets brightness on
/// each corresponding device concurrently.
pub struct BrightnessDispatcher<CS, DC> {
    entries: CS,
    connector: DC,
}

impl<CS, DC> BrightnessDispatcher<CS, DC>
where
    CS: ConfigEntryStore + Sync,
    DC: DeviceConnector + Sync,
{
    /// Create a dispatcher backed by the given config-entry store and connector.
    pub fn new(entries: CS, connector: DC) -> Self {
        Self { entries, connector }
    }

    /// Set `level` on every device owning one of `targets`.
    ///
    /// Entities without a resolvable config entry are skipped. Several
    /// entities sharing one entry contact that device once.
    ///
    /// # Errors
    ///
    /// Returns an error only when a config-entry lookup fails. Device
    /// failures are reported per device inside the [`DispatchReport`].
    #[tracing::instrument(skip(self, targets), fields(targets = targets.len()))]
    pub async fn dispatch(
        &self,
        targets: &ResolvedTargets,
        level: Brightness,
    ) -> Result<DispatchReport, KasaHelperError> {
        let entries = self.collect_entries(targets).await?;

        let outcomes = join_all(
            entries
                .into_values()
                .map(|entry| self.dispatch_one(entry, level)),
        )
        .await;

        let report = DispatchReport {
            brightness: level,
            outcomes,
        };
        tracing::info!(
            succeeded = report.succeeded().count(),
            failed = report.failed().count(),
            "brightness dispatched"
        );
        Ok(report)
    }

    async fn collect_entries(
        &self,
        targets: &ResolvedTargets,
    ) -> Result<BTreeMap<ConfigEntryId, ConfigEntry>, KasaHelperError> {
        let mut entries = BTreeMap::new();
        for entity in targets.values() {
            let Some(entry_id) = &entity.config_entry_id else {
                tracing::debug!(entity_id = %entity.entity_id, "no config entry, skipping");
                continue;
            };
            if entries.contains_key(entry_id) {
                continue;
            }
            match self.entries.get_entry(entry_id).await? {
                Some(entry) => {
                    entries.insert(entry_id.clone(), entry);
                }
                None => {
                    tracing::debug!(
                        entity_id = %entity.entity_id,
                        %entry_id,
                        "config entry not found, skipping"
                    );
                }
            }
        }
        Ok(entries)
    }

    async fn dispatch_one(&self, entry: ConfigEntry, level: Brightness) -> DeviceOutcome {
        let result = self.set_brightness(&entry, level).await;
        match &result {
            Ok(()) => {
                tracing::info!(
                    entry_id = %entry.entry_id,
                    host = ?entry.host(),
                    %level,
                    "brightness set"
                );
            }
            Err(err) => {
                tracing::warn!(
                    entry_id = %entry.entry_id,
                    host = ?entry.host(),
                    error = %err,
                    "failed to set brightness"
                );
            }
        }
        DeviceOutcome {
            host: entry.host().map(ToString::to_string),
            title: entry.title,
            entry_id: entry.entry_id,
            result,
        }
    }

    async fn set_brightness(
        &self,
        entry: &ConfigEntry,
        level: Brightness,
    ) -> Result<(), KasaHelperError> {
        let config = DeviceConfig::from_entry(entry)?;
        let connection = self.connector.connect(&config).await?;
        let mut control = BrightnessControl::from_connection(connection)?;
        control.set_brightness_preserving_power(level).await
    }
}
