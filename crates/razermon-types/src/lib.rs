//! Platform-agnostic types for razermon battery telemetry.
//!
//! This crate provides the records exchanged with the host process
//! (readings, device status, battery stats) together with the timestamp
//! codec used to put them on a chart.
//!
//! # Features
//!
//! - Host record types with serde support (`serde` feature, on by default)
//! - `created_at` parsing (`yyyy-MM-dd HH:mm:ss`, UTC) and `MM/dd HH:mm` labels
//! - Compact human-readable durations
//!
//! # Example
//!
//! ```
//! use razermon_types::{BatteryReading, CreatedAt};
//!
//! let reading = BatteryReading {
//!     product_id: 122,
//!     created_at: CreatedAt::from("2024-03-01 12:00:00"),
//!     percentage: 85.0,
//!     charging: false,
//! };
//! assert_eq!(reading.created_at.to_millis().unwrap(), 1_709_294_400_000);
//! ```

pub mod duration;
pub mod error;
pub mod timestamp;
pub mod types;

pub use duration::HumanDuration;
pub use error::{ParseError, ParseResult};
pub use types::{
    BatteryReading, BatteryStats, ChartPoint, CreatedAt, DeviceStatus, ProductId, StatValue,
};
