//! Wiring and runtime lifecycle of the whole warehouse core.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::SyncConfig;
use crate::lifecycle::OrderFlow;
use crate::repository;
use crate::sinks::{OrderSink, SpreadsheetSink, WarehouseServerSink};
use crate::store::LocalStore;

/// Depth of the repository's request channel.
const REPOSITORY_BUFFER: usize = 32;

/// The assembled system: store, repository actor, sinks, and the flow that
/// ties them together.
///
/// # Example
///
/// ```ignore
/// let config = SyncConfig::new("192.168.1.61", "https://example.com/hook");
/// let system = WarehouseSystem::start(config, data_dir).await?;
///
/// system.flow.add_order(draft).await?;
/// system.flow.ship_order(Some(0)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct WarehouseSystem {
    /// The lifecycle operations a screen would invoke.
    pub flow: OrderFlow,

    /// Handle of the repository actor task, awaited on shutdown.
    handle: tokio::task::JoinHandle<()>,
}

impl WarehouseSystem {
    /// Starts the system against live HTTP endpoints taken from `config`.
    ///
    /// Opens the store, loads the persisted collection into a fresh
    /// repository actor, and completes any shipment that was interrupted
    /// after both endpoints had already acknowledged.
    pub async fn start(config: SyncConfig, store_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let server_sink: Arc<dyn OrderSink> = Arc::new(WarehouseServerSink::new(
            &config.server_addr,
            config.server_port,
        ));
        let sheet_sink: Arc<dyn OrderSink> = Arc::new(SpreadsheetSink::new(&config.spreadsheet_url));
        Self::start_with_sinks(store_dir, server_sink, sheet_sink, config.optimistic_status).await
    }

    /// Starts the system with caller-supplied sinks.
    ///
    /// This is the seam tests use to swap in scripted sinks; `start`
    /// delegates here with the real HTTP implementations.
    pub async fn start_with_sinks(
        store_dir: impl Into<PathBuf>,
        server_sink: Arc<dyn OrderSink>,
        sheet_sink: Arc<dyn OrderSink>,
        optimistic_status: bool,
    ) -> io::Result<Self> {
        let store = LocalStore::open(store_dir).await?;
        let seed = store.load_orders().await;
        info!(size = seed.len(), "Loaded persisted collection");

        let (actor, repository) = repository::new(REPOSITORY_BUFFER, seed);
        let handle = tokio::spawn(actor.run(store.clone()));

        let flow = OrderFlow::new(repository, server_sink, sheet_sink, store, optimistic_status);
        if let Err(e) = flow.recover().await {
            warn!(error = %e, "Shipment recovery failed, record left for retry");
        }

        Ok(Self { flow, handle })
    }

    /// Gracefully shuts down: drops the flow (closing the repository's
    /// channel) and waits for the actor task to drain.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.flow);
        if let Err(e) = self.handle.await {
            error!("Repository task failed: {e:?}");
            return Err(format!("Repository task failed: {e:?}"));
        }
        info!("System shutdown complete.");
        Ok(())
    }
}
