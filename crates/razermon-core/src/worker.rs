//! Background worker for host-bridge calls.
//!
//! This module contains the [`TelemetryWorker`], which answers UI
//! [`Command`]s by calling the host in a tokio runtime so the UI thread never
//! waits on the host.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use razermon_types::ProductId;

use crate::SharedBridge;
use crate::bridge::{HostBridge, HostCall};
use crate::error::{BridgeError, Result};
use crate::messages::{Command, ViewEvent};
use crate::shaping::shape_history;

/// Background worker that talks to the host.
///
/// Each [`Command::FetchTelemetry`] issues the three telemetry calls
/// concurrently. Issuing a new fetch (or a new resolve) cancels the calls
/// still running for the previous one.
pub struct TelemetryWorker {
    bridge: SharedBridge,
    command_rx: mpsc::Receiver<Command>,
    event_tx: mpsc::Sender<ViewEvent>,
    /// Cancels the in-flight `selected_product_id` call.
    resolve_cancel: CancellationToken,
    /// Cancels the in-flight telemetry calls of the previous selection.
    fetch_cancel: CancellationToken,
}

impl TelemetryWorker {
    /// Create a new worker.
    pub fn new(
        bridge: SharedBridge,
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<ViewEvent>,
    ) -> Self {
        Self {
            bridge,
            command_rx,
            event_tx,
            resolve_cancel: CancellationToken::new(),
            fetch_cancel: CancellationToken::new(),
        }
    }

    /// Run the worker's main loop until [`Command::Shutdown`] or until the UI
    /// drops its command sender.
    pub async fn run(mut self) {
        info!("TelemetryWorker started");
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::Shutdown => break,
                cmd => self.handle_command(cmd),
            }
        }

        self.resolve_cancel.cancel();
        self.fetch_cancel.cancel();
        info!("TelemetryWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::ResolveSelection => self.handle_resolve(),
            Command::FetchTelemetry {
                product,
                generation,
            } => self.handle_fetch(product, generation),
            Command::Shutdown => {} // Handled in run() loop
        }
    }

    fn handle_resolve(&mut self) {
        self.resolve_cancel.cancel();
        self.resolve_cancel = CancellationToken::new();
        let token = self.resolve_cancel.clone();

        let bridge = Arc::clone(&self.bridge);
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!("Selection lookup superseded");
                    return;
                }
                result = bridge.selected_product_id() => result,
            };

            let event = match result {
                Ok(product) => {
                    debug!(product_id = ?product.map(ProductId::get), "Selection resolved");
                    ViewEvent::SelectionResolved(product)
                }
                Err(e) => {
                    warn!(
                        call = HostCall::SelectedProductId.name(),
                        error = %e,
                        "Failed to resolve selected product"
                    );
                    ViewEvent::SelectionFailed(e.to_string())
                }
            };
            send_event(&event_tx, event).await;
        });
    }

    fn handle_fetch(&mut self, product: ProductId, generation: u64) {
        info!(product_id = %product, generation, "Fetching telemetry");

        self.fetch_cancel.cancel();
        self.fetch_cancel = CancellationToken::new();

        let bridge = Arc::clone(&self.bridge);
        self.spawn_call(
            HostCall::DeviceStatus,
            product,
            async move { bridge.device_status(product).await },
            move |result| ViewEvent::StatusLoaded { generation, result },
        );

        let bridge = Arc::clone(&self.bridge);
        self.spawn_call(
            HostCall::ChargeHistory,
            product,
            async move {
                let readings = bridge.charge_history(product).await?;
                let received = readings.len();
                let points = shape_history(readings);
                debug!(
                    product_id = %product,
                    received,
                    kept = points.len(),
                    "Shaped charge history"
                );
                Ok::<_, BridgeError>(points)
            },
            move |result| ViewEvent::HistoryLoaded { generation, result },
        );

        let bridge = Arc::clone(&self.bridge);
        self.spawn_call(
            HostCall::BatteryStats,
            product,
            async move { bridge.battery_stats(product).await },
            move |result| ViewEvent::StatsLoaded { generation, result },
        );
    }

    /// Run one host call in its own task and report the outcome.
    ///
    /// Failures are logged here and reach the UI as error text only.
    fn spawn_call<T, Fut, F>(&self, call: HostCall, product: ProductId, fut: Fut, wrap: F)
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        F: FnOnce(std::result::Result<T, String>) -> ViewEvent + Send + 'static,
    {
        let token = self.fetch_cancel.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!(call = call.name(), product_id = %product, "Call superseded");
                    return;
                }
                result = fut => result,
            };

            let result = result.map_err(|e| {
                warn!(
                    call = call.name(),
                    product_id = %product,
                    error = %e,
                    "Host call failed"
                );
                e.to_string()
            });
            send_event(&event_tx, wrap(result)).await;
        });
    }
}

/// Send an event to the UI, logging any send failures.
async fn send_event(event_tx: &mpsc::Sender<ViewEvent>, event: ViewEvent) {
    if let Err(e) = event_tx.send(event).await {
        error!("Failed to send event to UI: {}", e);
    }
}
