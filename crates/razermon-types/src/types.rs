//! Core types for battery telemetry exchanged with the host.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseResult;
use crate::timestamp::parse_created_at;

/// Host identifier of the product (device) whose telemetry is displayed.
///
/// The host reports "nothing selected" either as `null` or as `0`, so a
/// `ProductId` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct ProductId(u32);

impl ProductId {
    /// Wrap a raw host identifier, treating `0` as absent.
    #[must_use]
    pub fn new(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    /// The raw identifier sent back to the host.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ProductId {
    type Error = &'static str;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or("product id must be non-zero")
    }
}

impl From<ProductId> for u32 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// When a charge-history record was captured.
///
/// Rows read straight from the host database carry a `yyyy-MM-dd HH:mm:ss`
/// UTC string; already-converted rows carry epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CreatedAt {
    /// Epoch milliseconds, passed through unchanged.
    Epoch(i64),
    /// Host timestamp string.
    Text(String),
}

impl CreatedAt {
    /// Epoch milliseconds of this timestamp.
    pub fn to_millis(&self) -> ParseResult<i64> {
        match self {
            CreatedAt::Epoch(millis) => Ok(*millis),
            CreatedAt::Text(text) => parse_created_at(text),
        }
    }
}

impl From<i64> for CreatedAt {
    fn from(millis: i64) -> Self {
        CreatedAt::Epoch(millis)
    }
}

impl From<&str> for CreatedAt {
    fn from(text: &str) -> Self {
        CreatedAt::Text(text.to_string())
    }
}

/// One timestamped battery-percentage observation, as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatteryReading {
    pub product_id: u32,
    pub created_at: CreatedAt,
    /// Charge level, 0-100. Zero marks a failed device read.
    pub percentage: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub charging: bool,
}

/// A [`BatteryReading`] with its timestamp resolved for charting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChartPoint {
    pub product_id: u32,
    pub created_at: CreatedAt,
    pub percentage: f64,
    pub charging: bool,
    /// Epoch milliseconds; the chart's x value.
    pub millis: i64,
}

impl ChartPoint {
    /// Attach resolved epoch milliseconds to a reading.
    #[must_use]
    pub fn new(reading: BatteryReading, millis: i64) -> Self {
        Self {
            product_id: reading.product_id,
            created_at: reading.created_at,
            percentage: reading.percentage,
            charging: reading.charging,
            millis,
        }
    }

    /// `[x, y]` pair for plotting.
    pub fn xy(&self) -> [f64; 2] {
        [self.millis as f64, self.percentage]
    }
}

impl From<ChartPoint> for BatteryReading {
    fn from(point: ChartPoint) -> Self {
        Self {
            product_id: point.product_id,
            created_at: CreatedAt::Epoch(point.millis),
            percentage: point.percentage,
            charging: point.charging,
        }
    }
}

/// Status record for the selected device.
///
/// Only `name` is guaranteed; the rest is filled when the host could reach
/// the device. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceStatus {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub device_id: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub percentage: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub charging: Option<bool>,
}

impl DeviceStatus {
    /// Glyph for the current charge state.
    pub fn charge_icon(&self) -> Option<&'static str> {
        let percentage = self.percentage?;
        Some(if self.charging.unwrap_or(false) {
            "⚡️"
        } else if percentage > 60 {
            "🔋"
        } else if percentage > 20 {
            "🪫"
        } else {
            "🔌"
        })
    }

    /// `🔋85%`-style label, if the host reported a percentage.
    pub fn charge_label(&self) -> Option<String> {
        let icon = self.charge_icon()?;
        Some(format!("{}{}%", icon, self.percentage?))
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.charge_label() {
            Some(label) => write!(f, "{} {}", self.name, label),
            None => f.write_str(&self.name),
        }
    }
}

/// A value from the host's stats tuple, shown verbatim.
///
/// Strings display without quotes; arrays and objects display as JSON text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StatValue {
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    /// Anything that is not a scalar.
    #[cfg(feature = "serde")]
    Json(serde_json::Value),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Flag(v) => write!(f, "{v}"),
            StatValue::Integer(v) => write!(f, "{v}"),
            StatValue::Number(v) => write!(f, "{v}"),
            StatValue::Text(v) => f.write_str(v),
            #[cfg(feature = "serde")]
            StatValue::Json(v) => write!(f, "{v}"),
        }
    }
}

/// Aggregate charge state, delivered by the host as `[status, remaining]`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        from = "(Option<StatValue>, Option<StatValue>)",
        into = "(Option<StatValue>, Option<StatValue>)"
    )
)]
pub struct BatteryStats {
    pub status: Option<StatValue>,
    pub remaining: Option<StatValue>,
}

impl From<(Option<StatValue>, Option<StatValue>)> for BatteryStats {
    fn from((status, remaining): (Option<StatValue>, Option<StatValue>)) -> Self {
        Self { status, remaining }
    }
}

impl From<BatteryStats> for (Option<StatValue>, Option<StatValue>) {
    fn from(stats: BatteryStats) -> Self {
        (stats.status, stats.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(percentage: Option<u8>, charging: Option<bool>) -> DeviceStatus {
        DeviceStatus {
            name: "Razer Viper Ultimate".to_string(),
            device_id: Some(0x007a),
            percentage,
            charging,
        }
    }

    #[test]
    fn test_product_id_zero_is_absent() {
        assert_eq!(ProductId::new(0), None);
        assert_eq!(ProductId::new(122).map(ProductId::get), Some(122));
    }

    #[test]
    fn test_created_at_epoch_passes_through() {
        assert_eq!(CreatedAt::Epoch(1_234).to_millis(), Ok(1_234));
        assert_eq!(CreatedAt::Epoch(-5).to_millis(), Ok(-5));
    }

    #[test]
    fn test_created_at_text_parses_utc() {
        let created = CreatedAt::from("2024-03-01 12:00:00");
        assert_eq!(created.to_millis(), Ok(1_709_294_400_000));
    }

    #[test]
    fn test_chart_point_back_to_reading_uses_epoch() {
        let reading = BatteryReading {
            product_id: 7,
            created_at: CreatedAt::from("2024-03-01 12:00:00"),
            percentage: 42.0,
            charging: true,
        };
        let point = ChartPoint::new(reading, 1_709_294_400_000);
        assert_eq!(point.xy(), [1_709_294_400_000.0, 42.0]);

        let back = BatteryReading::from(point);
        assert_eq!(back.created_at, CreatedAt::Epoch(1_709_294_400_000));
        assert!(back.charging);
    }

    #[test]
    fn test_charge_icon_thresholds() {
        assert_eq!(status(Some(90), Some(true)).charge_icon(), Some("⚡️"));
        assert_eq!(status(Some(61), Some(false)).charge_icon(), Some("🔋"));
        assert_eq!(status(Some(60), Some(false)).charge_icon(), Some("🪫"));
        assert_eq!(status(Some(21), None).charge_icon(), Some("🪫"));
        assert_eq!(status(Some(20), None).charge_icon(), Some("🔌"));
        assert_eq!(status(None, Some(true)).charge_icon(), None);
    }

    #[test]
    fn test_device_status_display() {
        assert_eq!(
            status(Some(85), Some(false)).to_string(),
            "Razer Viper Ultimate 🔋85%"
        );
        assert_eq!(status(None, None).to_string(), "Razer Viper Ultimate");
    }

    #[test]
    fn test_stat_value_display_is_verbatim() {
        assert_eq!(StatValue::Text("2h 05m".to_string()).to_string(), "2h 05m");
        assert_eq!(StatValue::Integer(7200).to_string(), "7200");
        assert_eq!(StatValue::Number(1.5).to_string(), "1.5");
        assert_eq!(StatValue::Flag(true).to_string(), "true");
    }

    // --- Serialization tests ---

    #[test]
    fn test_battery_reading_deserialization_text_timestamp() {
        let json = r#"{"product_id":122,"created_at":"2024-03-01 12:00:00","percentage":85,"charging":false}"#;
        let reading: BatteryReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.product_id, 122);
        assert_eq!(reading.created_at, CreatedAt::from("2024-03-01 12:00:00"));
        assert_eq!(reading.percentage, 85.0);
        assert!(!reading.charging);
    }

    #[test]
    fn test_battery_reading_deserialization_epoch_timestamp() {
        let json = r#"{"product_id":122,"created_at":1709294400000,"percentage":12.5}"#;
        let reading: BatteryReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.created_at, CreatedAt::Epoch(1_709_294_400_000));
        assert_eq!(reading.percentage, 12.5);
        assert!(!reading.charging);
    }

    #[test]
    fn test_device_status_ignores_unknown_fields() {
        let json = r#"{"name":"Viper","percentage":40,"charging":false,"serial":"PM2012"}"#;
        let status: DeviceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.name, "Viper");
        assert_eq!(status.percentage, Some(40));
        assert_eq!(status.device_id, None);
    }

    #[test]
    fn test_battery_stats_from_tuple() {
        let stats: BatteryStats = serde_json::from_str(r#"["discharging","4h 10m"]"#).unwrap();
        assert_eq!(stats.status, Some(StatValue::Text("discharging".to_string())));
        assert_eq!(stats.remaining, Some(StatValue::Text("4h 10m".to_string())));
    }

    #[test]
    fn test_battery_stats_with_nulls_and_numbers() {
        let stats: BatteryStats = serde_json::from_str("[null, 3600]").unwrap();
        assert_eq!(stats.status, None);
        assert_eq!(stats.remaining, Some(StatValue::Integer(3600)));
    }

    #[test]
    fn test_battery_stats_keeps_remaining_next_to_structured_status() {
        let stats: BatteryStats =
            serde_json::from_str(r#"[{"state":"discharging"},"4h 10m"]"#).unwrap();
        assert_eq!(stats.remaining, Some(StatValue::Text("4h 10m".to_string())));
        assert_eq!(
            stats.status.map(|s| s.to_string()).as_deref(),
            Some(r#"{"state":"discharging"}"#)
        );

        let stats: BatteryStats = serde_json::from_str(r#"[["a","b"],"4h 10m"]"#).unwrap();
        assert_eq!(
            stats.status,
            Some(StatValue::Json(serde_json::json!(["a", "b"])))
        );
        assert_eq!(stats.status.unwrap().to_string(), r#"["a","b"]"#);
    }

    #[test]
    fn test_battery_stats_serializes_as_tuple() {
        let stats = BatteryStats {
            status: Some(StatValue::Flag(true)),
            remaining: None,
        };
        assert_eq!(serde_json::to_string(&stats).unwrap(), "[true,null]");
    }

    #[test]
    fn test_product_id_serde() {
        let id: ProductId = serde_json::from_str("122").unwrap();
        assert_eq!(id.get(), 122);
        assert!(serde_json::from_str::<ProductId>("0").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "122");
    }
}
