//! Demo mode with deterministic mock data.
//!
//! `--demo` runs the viewer against a [`MockBridge`] seeded here, so the
//! window can be checked (and screenshotted) without a host process.

use time::{Duration, OffsetDateTime};
use tracing::warn;

use razermon_core::{MockBridge, MockProduct};
use razermon_types::timestamp::format_created_at;
use razermon_types::{
    BatteryReading, BatteryStats, CreatedAt, DeviceStatus, HumanDuration, ProductId, StatValue,
};

/// Product id of the demo mouse.
pub const DEMO_PRODUCT_ID: u32 = 122;

/// Hours of history in the demo.
const HISTORY_HOURS: i64 = 48;
/// Minutes between demo samples.
const SAMPLE_MINUTES: i64 = 10;
/// Every n-th sample is a failed device read.
const FAILED_READ_EVERY: usize = 23;
/// Discharge rate, percent per hour.
const DRAIN_PER_HOUR: f64 = 2.5;
/// Charge rate, percent per hour.
const CHARGE_PER_HOUR: f64 = 25.0;
/// When the mouse goes on the charger.
const CHARGE_START_HOUR: f64 = 30.0;

/// A mock host with the demo mouse selected.
pub fn demo_bridge(now: OffsetDateTime) -> MockBridge {
    let Some(id) = ProductId::new(DEMO_PRODUCT_ID) else {
        return MockBridge::new();
    };
    MockBridge::new()
        .with_product(id, demo_product(now))
        .with_selected(Some(id))
}

fn demo_product(now: OffsetDateTime) -> MockProduct {
    let history = demo_history(now);
    let level = history
        .iter()
        .rev()
        .find(|r| r.percentage > 0.0)
        .map_or(0.0, |r| r.percentage);
    let remaining = Duration::seconds_f64(level / DRAIN_PER_HOUR * 3600.0);

    MockProduct {
        status: Some(DeviceStatus {
            name: "Razer Viper Ultimate".to_string(),
            device_id: Some(DEMO_PRODUCT_ID),
            percentage: Some(level as u8),
            charging: Some(false),
        }),
        history,
        stats: BatteryStats {
            status: Some(StatValue::Text("discharging".to_string())),
            remaining: Some(StatValue::Text(remaining.as_human().to_string())),
        },
    }
}

/// Charge level `hours` into the demo window: a discharge, a charge back to
/// full, then a second discharge.
fn level_at(hours: f64) -> (f64, bool) {
    let low = 100.0 - CHARGE_START_HOUR * DRAIN_PER_HOUR;
    let full_at = CHARGE_START_HOUR + (100.0 - low) / CHARGE_PER_HOUR;

    if hours < CHARGE_START_HOUR {
        (100.0 - hours * DRAIN_PER_HOUR, false)
    } else if hours < full_at {
        (low + (hours - CHARGE_START_HOUR) * CHARGE_PER_HOUR, true)
    } else {
        (100.0 - (hours - full_at) * DRAIN_PER_HOUR, false)
    }
}

/// 48 hours of readings ending at `now`, oldest first.
///
/// Levels are whole percentages, so consecutive samples repeat the way the
/// host's polling does, and some samples are `0` failed reads.
pub fn demo_history(now: OffsetDateTime) -> Vec<BatteryReading> {
    let samples = HISTORY_HOURS * 60 / SAMPLE_MINUTES;
    let start = now - Duration::hours(HISTORY_HOURS);

    (0..=samples)
        .filter_map(|i| {
            let at = start + Duration::minutes(i * SAMPLE_MINUTES);
            let created_at = match format_created_at(at) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Skipping demo sample");
                    return None;
                }
            };

            let (level, charging) = level_at((i * SAMPLE_MINUTES) as f64 / 60.0);
            let percentage = if i as usize % FAILED_READ_EVERY == FAILED_READ_EVERY - 1 {
                0.0
            } else {
                level.clamp(1.0, 100.0).floor()
            };

            Some(BatteryReading {
                product_id: DEMO_PRODUCT_ID,
                created_at: CreatedAt::Text(created_at),
                percentage,
                charging,
            })
        })
        .collect()
}
