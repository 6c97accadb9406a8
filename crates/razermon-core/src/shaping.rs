//! Charge-history shaping: host readings to chart points.
//!
//! The host records a reading every poll, so most of the history is long runs
//! of the same percentage, plus `0` rows for polls where the device could not
//! be read. Shaping keeps only the points where the charge level changed.

use time::Duration;
use tracing::warn;

use razermon_types::{BatteryReading, ChartPoint};

/// A usable charge level. NaN is never usable.
fn is_valid_percentage(percentage: f64) -> bool {
    percentage > 0.0
}

/// Shape host readings into chart points.
///
/// 1. Readings with a non-positive (or NaN) percentage are dropped, as are
///    readings whose timestamp cannot be parsed.
/// 2. Runs of equal percentage are collapsed to their first reading.
/// 3. Each kept reading gets its epoch-millisecond timestamp attached.
///
/// Relative order is preserved; the host's ordering is not re-checked.
///
/// # Example
///
/// ```
/// use razermon_core::shape_history;
/// use razermon_types::{BatteryReading, CreatedAt};
///
/// let readings: Vec<BatteryReading> = [0.0, 10.0, 10.0, 20.0, 0.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &percentage)| BatteryReading {
///         product_id: 1,
///         created_at: CreatedAt::Epoch(i as i64 * 60_000),
///         percentage,
///         charging: false,
///     })
///     .collect();
///
/// let points = shape_history(readings);
/// let levels: Vec<f64> = points.iter().map(|p| p.percentage).collect();
/// assert_eq!(levels, [10.0, 20.0]);
/// ```
pub fn shape_history<I>(readings: I) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = BatteryReading>,
{
    let mut points: Vec<ChartPoint> = Vec::new();

    for reading in readings {
        if !is_valid_percentage(reading.percentage) {
            continue;
        }

        let millis = match reading.created_at.to_millis() {
            Ok(millis) => millis,
            Err(e) => {
                warn!(
                    product_id = reading.product_id,
                    error = %e,
                    "Dropping reading with unparseable timestamp"
                );
                continue;
            }
        };

        if points
            .last()
            .is_some_and(|last| last.percentage == reading.percentage)
        {
            continue;
        }

        points.push(ChartPoint::new(reading, millis));
    }

    points
}

/// Time covered by shaped points, first to last.
pub fn history_span(points: &[ChartPoint]) -> Option<Duration> {
    let first = points.first()?;
    let last = points.last()?;
    Some(Duration::milliseconds(last.millis.saturating_sub(first.millis)))
}
