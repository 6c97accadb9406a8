//! # razermon
//!
//! Desktop viewer for the battery history of the peripheral selected in the
//! host app.
//!
//! ## Usage
//!
//! ```sh
//! razermon                          # host URL from the config file
//! razermon --host-url http://127.0.0.1:1420
//! razermon --demo                   # built-in mock data
//! ```
//!
//! ### Options
//!
//! - `--host-url <URL>` - Base URL of the host bridge
//! - `--config <PATH>` - Alternate config file
//! - `--demo` - Run against mock data, no host needed
//!
//! ## Library Usage
//!
//! Host calls, history shaping and the view state machine live in
//! [`razermon-core`](razermon_core); this crate only adds the window.

pub mod config;
pub mod gui;

pub use config::{Config, GuiConfig};
pub use gui::{GuiOptions, run};
