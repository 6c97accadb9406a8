//! Message types for UI/worker communication.
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI Thread     | --------------> | TelemetryWorker  |
//! |      (egui)      |                 |  (tokio runtime) |
//! |                  | <-------------- |                  |
//! +------------------+    ViewEvent    +------------------+
//! ```
//!
//! - [`Command`]: requests from the UI to the worker
//! - [`ViewEvent`]: host answers from the worker, applied to
//!   [`crate::ViewState`]
//!
//! Telemetry commands and events carry the selection `generation` they were
//! issued for, so answers for a superseded selection can be recognised and
//! dropped.

use razermon_types::{BatteryStats, ChartPoint, DeviceStatus, ProductId};

/// Commands sent from the UI thread to the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the host which product is selected.
    ResolveSelection,

    /// Fetch status, history and stats for a product.
    FetchTelemetry {
        product: ProductId,
        /// Selection generation the answers belong to.
        generation: u64,
    },

    /// Shut down the worker.
    Shutdown,
}

/// Events sent from the worker back to the UI thread.
///
/// Failures carry the error text only; it has already been logged by the
/// worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// The host answered `selected_product_id`.
    SelectionResolved(Option<ProductId>),

    /// `selected_product_id` failed.
    SelectionFailed(String),

    /// `device_status` finished.
    StatusLoaded {
        generation: u64,
        result: Result<Option<DeviceStatus>, String>,
    },

    /// `charge_history` finished; points are already shaped.
    HistoryLoaded {
        generation: u64,
        result: Result<Vec<ChartPoint>, String>,
    },

    /// `battery_stats` finished.
    StatsLoaded {
        generation: u64,
        result: Result<BatteryStats, String>,
    },
}
