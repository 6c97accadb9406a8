//! Host bridge, history shaping and view state for the razermon viewer.
//!
//! The viewer never talks to devices itself. A host process polls the
//! devices and stores their battery readings; this crate asks the host for
//! the selected product and its telemetry, shapes the charge history for
//! charting, and tracks what the screen should show while answers arrive.
//!
//! # Pieces
//!
//! - [`HostBridge`]: the four host calls, implemented by [`HttpBridge`]
//!   (feature `http-bridge`) and [`MockBridge`]
//! - [`shape_history`]: drops invalid readings and collapses runs of equal
//!   percentage
//! - [`TelemetryWorker`]: runs host calls off the UI thread
//! - [`ViewState`]: the screen's state machine, fed with [`ViewEvent`]s
//!
//! # Quick Start
//!
//! ```
//! use razermon_core::{HostBridge, MockBridge, MockProduct, shape_history};
//! use razermon_types::ProductId;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), razermon_core::BridgeError> {
//! let id = ProductId::new(122).unwrap();
//! let bridge = MockBridge::new()
//!     .with_product(id, MockProduct::named("Viper Ultimate"))
//!     .with_selected(Some(id));
//!
//! if let Some(product) = bridge.selected_product_id().await? {
//!     let readings = bridge.charge_history(product).await?;
//!     let points = shape_history(readings);
//!     println!("{} chart points", points.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod error;
#[cfg(feature = "http-bridge")]
pub mod http;
pub mod messages;
pub mod mock;
pub mod shaping;
pub mod view;
pub mod worker;

pub use razermon_types as types;

pub use bridge::{HostBridge, HostCall};
pub use error::{BridgeError, Result};
#[cfg(feature = "http-bridge")]
pub use http::{DEFAULT_REQUEST_TIMEOUT, HttpBridge};
pub use messages::{Command, ViewEvent};
pub use mock::{MockBridge, MockProduct};
pub use shaping::{history_span, shape_history};
pub use view::{ProductView, RenderState, Selection, Slot, ViewState};
pub use worker::TelemetryWorker;

/// A bridge shared between the worker and its spawned calls.
pub type SharedBridge = std::sync::Arc<dyn HostBridge>;
