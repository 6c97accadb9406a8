//! Text formatting for the chart and the status lines.

use time::UtcOffset;

use razermon_core::history_span;
use razermon_types::timestamp::format_chart_label;
use razermon_types::{ChartPoint, HumanDuration};

/// X-axis tick label (`MM/dd HH:mm`) for an epoch-millisecond position.
///
/// Positions outside the representable range get no label.
pub fn axis_label(millis: f64, offset: UtcOffset) -> String {
    if !millis.is_finite() {
        return String::new();
    }
    format_chart_label(millis.round() as i64, offset).unwrap_or_default()
}

/// Hover text for a chart point: `"{MM/dd HH:mm} - {percentage}%"`.
pub fn tooltip_text(millis: f64, percentage: f64, offset: UtcOffset) -> Option<String> {
    let label = axis_label(millis, offset);
    if label.is_empty() {
        return None;
    }
    Some(format!("{} - {}%", label, percentage))
}

/// `"42 points"` header text.
pub fn point_count_label(count: usize) -> String {
    match count {
        1 => "1 point".to_string(),
        n => format!("{} points", n),
    }
}

/// Human-readable span of the charted history, e.g. `"over 2d 10h"`.
pub fn span_label(points: &[ChartPoint]) -> Option<String> {
    let span = history_span(points)?;
    if span.is_zero() {
        return None;
    }
    Some(format!("over {}", span.as_human()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use razermon_types::{BatteryReading, CreatedAt};
    use time::macros::offset;

    // 2024-03-01 12:00:00 UTC
    const NOON: i64 = 1_709_294_400_000;

    fn point(millis: i64, percentage: f64) -> ChartPoint {
        ChartPoint::new(
            BatteryReading {
                product_id: 1,
                created_at: CreatedAt::Epoch(millis),
                percentage,
                charging: false,
            },
            millis,
        )
    }

    #[test]
    fn test_axis_label_uses_offset() {
        assert_eq!(axis_label(NOON as f64, UtcOffset::UTC), "03/01 12:00");
        assert_eq!(axis_label(NOON as f64, offset!(+2)), "03/01 14:00");
    }

    #[test]
    fn test_axis_label_out_of_range() {
        assert_eq!(axis_label(f64::NAN, UtcOffset::UTC), "");
        assert_eq!(axis_label(1e30, UtcOffset::UTC), "");
    }

    #[test]
    fn test_tooltip_text() {
        assert_eq!(
            tooltip_text(NOON as f64, 85.0, UtcOffset::UTC).as_deref(),
            Some("03/01 12:00 - 85%")
        );
        assert_eq!(
            tooltip_text(NOON as f64, 89.5, UtcOffset::UTC).as_deref(),
            Some("03/01 12:00 - 89.5%")
        );
        assert_eq!(tooltip_text(f64::INFINITY, 10.0, UtcOffset::UTC), None);
    }

    #[test]
    fn test_point_count_label() {
        assert_eq!(point_count_label(1), "1 point");
        assert_eq!(point_count_label(42), "42 points");
    }

    #[test]
    fn test_span_label() {
        let hour = 3_600_000;
        let points = [point(NOON, 90.0), point(NOON + 58 * hour, 40.0)];
        assert_eq!(span_label(&points).as_deref(), Some("over 2d 10h"));
        assert_eq!(span_label(&points[..1]), None);
        assert_eq!(span_label(&[]), None);
    }
}
