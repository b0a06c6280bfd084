//! # kasa-helperd: kasa_helper daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` with the configured filter
//! - Load the host's registries from its `.storage` directory
//! - Construct the device connector selected by `[devices] backend`
//! - Construct the `set_brightness` handler, injecting both via port traits
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use kasa_helper_adapter_ha_storage::{HaRegistry, RegistrySnapshot};
use kasa_helper_adapter_http_axum::state::AppState;
use kasa_helper_adapter_kasa::KasaConnector;
use kasa_helper_adapter_virtual::VirtualConnector;
use kasa_helper_app::ports::DeviceConnector;
use kasa_helper_app::services::set_brightness::SetBrightnessHandler;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, DeviceBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Registries
    let snapshot = RegistrySnapshot::load(&config.registry.storage_dir)?;
    let registry = HaRegistry::new(snapshot);

    // Devices
    match config.devices.backend {
        DeviceBackend::Kasa => {
            let connector = KasaConnector::new(config.devices.kasa.clone())?;
            serve(&config, registry, connector).await
        }
        DeviceBackend::Virtual => {
            if config.devices.virtual_devices.is_empty() {
                tracing::warn!("virtual backend selected but no devices declared");
            }
            let connector = VirtualConnector::new(&config.devices.virtual_devices);
            serve(&config, registry, connector).await
        }
    }
}

async fn serve<DC>(
    config: &Config,
    registry: HaRegistry,
    connector: DC,
) -> Result<(), Box<dyn std::error::Error>>
where
    DC: DeviceConnector + Send + Sync + 'static,
{
    let handler = SetBrightnessHandler::new(
        registry.clone(),
        registry.clone(),
        registry.clone(),
        registry,
        connector,
    );
    let app = kasa_helper_adapter_http_axum::router::build(AppState::new(handler));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, backend = ?config.devices.backend, "kasa-helperd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("kasa-helperd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
