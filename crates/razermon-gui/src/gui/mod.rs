//! Native desktop window for the charge-history viewer.
//!
//! Built with [egui](https://www.egui.rs/). Host calls run on a tokio runtime
//! in a background thread; the window only exchanges messages with it.
//!
//! # Usage
//!
//! ```bash
//! razermon                                # talk to the host at the configured URL
//! razermon --host-url http://127.0.0.1:1420
//! razermon --demo                         # built-in mock data
//! ```

mod app;
mod components;
pub mod demo;
mod helpers;
mod panels;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc as std_mpsc;

use anyhow::{Context, Result};
use egui::ViewportBuilder;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use razermon_core::{Command, HttpBridge, SharedBridge, TelemetryWorker, ViewEvent};
use razermon_types::timestamp::local_offset;

use crate::config::Config;

pub use app::{AppOptions, RazermonApp};
pub use theme::{Theme, ThemeMode};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "razermon=info";

/// Options for running the GUI application.
#[derive(Debug, Default, Clone)]
pub struct GuiOptions {
    /// Run against built-in mock data instead of the host.
    pub demo: bool,
    /// Host URL overriding the config file.
    pub host_url: Option<String>,
    /// Alternate config file.
    pub config_path: Option<PathBuf>,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// Run the GUI application.
///
/// This is the main entry point for the GUI. It:
/// 1. Loads the config and picks the host bridge (HTTP or demo)
/// 2. Sets up the tokio runtime in a background thread
/// 3. Spawns the [`TelemetryWorker`] and asks it for the selected product
/// 4. Runs the egui/eframe main loop
pub fn run(options: GuiOptions) -> Result<()> {
    // Must be read while the process is still single-threaded.
    let offset = local_offset();
    init_tracing();

    let config = match &options.config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let bridge: SharedBridge = if options.demo {
        info!("Running in demo mode with mock data");
        Arc::new(demo::demo_bridge(OffsetDateTime::now_utc()))
    } else {
        let host_url = options.host_url.as_deref().unwrap_or(&config.host_url);
        info!(host_url, "Using host bridge");
        Arc::new(
            HttpBridge::with_timeout(host_url, config.request_timeout())
                .with_context(|| format!("Cannot use host URL {}", host_url))?,
        )
    };

    let (command_tx, command_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx_tokio) = mpsc::channel::<ViewEvent>(32);

    // Bridge from tokio mpsc to std mpsc for sync access in egui
    let (std_tx, std_rx) = std_mpsc::channel::<ViewEvent>();

    // Queued before the worker starts; the channel buffers it.
    command_tx
        .try_send(Command::ResolveSelection)
        .context("Failed to queue the initial selection lookup")?;

    let worker_thread = std::thread::Builder::new()
        .name("razermon-worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    return;
                }
            };
            rt.block_on(async {
                let worker = TelemetryWorker::new(bridge, command_rx, event_tx);

                // Forward events from worker to std channel
                let mut event_rx = event_rx_tokio;
                let forward_handle = tokio::spawn(async move {
                    while let Some(event) = event_rx.recv().await {
                        if std_tx.send(event).is_err() {
                            break; // GUI closed
                        }
                    }
                });

                worker.run().await;
                forward_handle.abort();
            });
        })
        .context("Failed to spawn worker thread")?;

    let gui = &config.gui;
    let viewport = ViewportBuilder::default()
        .with_title("razermon")
        .with_inner_size([gui.window_width, gui.window_height])
        .with_min_inner_size([480.0, 320.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app_options = AppOptions {
        theme_mode: gui.theme,
        chart_height: gui.chart_height,
        refresh_interval: config.refresh_interval(),
        offset,
        demo: options.demo,
    };

    eframe::run_native(
        "razermon",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(RazermonApp::new(
                cc,
                command_tx,
                std_rx,
                app_options,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))?;

    if worker_thread.join().is_err() {
        error!("Worker thread panicked");
    }
    Ok(())
}
