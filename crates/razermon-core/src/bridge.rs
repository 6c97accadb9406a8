//! The host bridge: the four calls the viewer makes into the host process.
//!
//! The host owns device polling and the battery database. The viewer only
//! asks it questions, through whichever [`HostBridge`] it was handed: an
//! [`crate::HttpBridge`] in the desktop app, a [`crate::MockBridge`] in tests
//! and demo mode.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use razermon_types::{BatteryReading, BatteryStats, DeviceStatus, ProductId};

use crate::error::Result;

/// Named host calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCall {
    SelectedProductId,
    DeviceStatus,
    ChargeHistory,
    BatteryStats,
}

impl HostCall {
    /// All calls, in the order the viewer issues them.
    pub const ALL: [HostCall; 4] = [
        HostCall::SelectedProductId,
        HostCall::DeviceStatus,
        HostCall::ChargeHistory,
        HostCall::BatteryStats,
    ];

    /// Wire name of the call.
    pub const fn name(self) -> &'static str {
        match self {
            HostCall::SelectedProductId => "selected_product_id",
            HostCall::DeviceStatus => "device_status",
            HostCall::ChargeHistory => "charge_history",
            HostCall::BatteryStats => "battery_stats",
        }
    }
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Request/response access to the host process.
///
/// # Example
///
/// ```
/// use razermon_core::{HostBridge, MockBridge, MockProduct};
/// use razermon_types::ProductId;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let id = ProductId::new(122).unwrap();
/// let bridge = MockBridge::new().with_product(id, MockProduct::named("Viper"));
/// bridge.select(Some(id)).await;
///
/// assert_eq!(bridge.selected_product_id().await.unwrap(), Some(id));
/// assert_eq!(bridge.device_status(id).await.unwrap().unwrap().name, "Viper");
/// # }
/// ```
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// The product currently selected in the host, if any.
    async fn selected_product_id(&self) -> Result<Option<ProductId>>;

    /// Live status of the product's device, or `None` when the host cannot
    /// find a device for it.
    async fn device_status(&self, product: ProductId) -> Result<Option<DeviceStatus>>;

    /// Stored charge history, oldest first.
    async fn charge_history(&self, product: ProductId) -> Result<Vec<BatteryReading>>;

    /// Aggregate `[status, remaining]` battery stats.
    async fn battery_stats(&self, product: ProductId) -> Result<BatteryStats>;
}

#[async_trait]
impl<T: HostBridge + ?Sized> HostBridge for Arc<T> {
    async fn selected_product_id(&self) -> Result<Option<ProductId>> {
        (**self).selected_product_id().await
    }

    async fn device_status(&self, product: ProductId) -> Result<Option<DeviceStatus>> {
        (**self).device_status(product).await
    }

    async fn charge_history(&self, product: ProductId) -> Result<Vec<BatteryReading>> {
        (**self).charge_history(product).await
    }

    async fn battery_stats(&self, product: ProductId) -> Result<BatteryStats> {
        (**self).battery_stats(product).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_names_match_host_commands() {
        let names: Vec<&str> = HostCall::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            [
                "selected_product_id",
                "device_status",
                "charge_history",
                "battery_stats"
            ]
        );
    }

    #[test]
    fn test_call_display() {
        assert_eq!(HostCall::ChargeHistory.to_string(), "charge_history");
    }
}
