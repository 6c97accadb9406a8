//! Mock host bridge for testing and demo mode.
//!
//! [`MockBridge`] implements [`HostBridge`] entirely in memory, so the worker
//! and the view state can be exercised without a host process.
//!
//! # Features
//!
//! - **Per-product data**: status, history and stats for any number of products
//! - **Failure injection**: make a specific call reject
//! - **Latency simulation**: delay a call globally or for one product only

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use razermon_types::{BatteryReading, BatteryStats, DeviceStatus, ProductId};

use crate::bridge::{HostBridge, HostCall};
use crate::error::{BridgeError, Result};

/// Everything the mock host knows about one product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockProduct {
    /// `None` makes `device_status` answer `null`.
    pub status: Option<DeviceStatus>,
    pub history: Vec<BatteryReading>,
    pub stats: BatteryStats,
}

impl MockProduct {
    /// A product with a status name and nothing else.
    pub fn named(name: &str) -> Self {
        Self {
            status: Some(DeviceStatus {
                name: name.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Set the charge history.
    #[must_use]
    pub fn with_history(mut self, history: Vec<BatteryReading>) -> Self {
        self.history = history;
        self
    }

    /// Set the battery stats.
    #[must_use]
    pub fn with_stats(mut self, stats: BatteryStats) -> Self {
        self.stats = stats;
        self
    }
}

/// An in-memory host.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use razermon_core::{HostBridge, HostCall, MockBridge, MockProduct};
/// use razermon_types::ProductId;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let id = ProductId::new(7).unwrap();
/// let bridge = MockBridge::new().with_product(id, MockProduct::named("Basilisk"));
///
/// bridge.fail(HostCall::DeviceStatus, "device asleep").await;
/// assert!(bridge.device_status(id).await.is_err());
/// assert_eq!(bridge.call_count(HostCall::DeviceStatus), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockBridge {
    selected: RwLock<Option<ProductId>>,
    products: RwLock<HashMap<ProductId, MockProduct>>,
    failures: RwLock<HashMap<HostCall, String>>,
    latencies: RwLock<HashMap<(HostCall, Option<ProductId>), Duration>>,
    calls: [AtomicU32; 4],
}

impl MockBridge {
    /// Create an empty mock host with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product (builder style).
    #[must_use]
    pub fn with_product(mut self, id: ProductId, product: MockProduct) -> Self {
        self.products.get_mut().insert(id, product);
        self
    }

    /// Set the initial selection (builder style).
    #[must_use]
    pub fn with_selected(mut self, id: Option<ProductId>) -> Self {
        *self.selected.get_mut() = id;
        self
    }

    /// Change which product the host reports as selected.
    pub async fn select(&self, id: Option<ProductId>) {
        *self.selected.write().await = id;
    }

    /// Add or replace a product.
    pub async fn set_product(&self, id: ProductId, product: MockProduct) {
        self.products.write().await.insert(id, product);
    }

    /// Make `call` reject with `message` until [`MockBridge::clear_failure`].
    pub async fn fail(&self, call: HostCall, message: &str) {
        self.failures
            .write()
            .await
            .insert(call, message.to_string());
    }

    /// Let `call` succeed again.
    pub async fn clear_failure(&self, call: HostCall) {
        self.failures.write().await.remove(&call);
    }

    /// Delay every invocation of `call`.
    pub async fn set_latency(&self, call: HostCall, latency: Duration) {
        self.latencies.write().await.insert((call, None), latency);
    }

    /// Delay `call` only when issued for `product`.
    pub async fn set_product_latency(&self, call: HostCall, product: ProductId, latency: Duration) {
        self.latencies
            .write()
            .await
            .insert((call, Some(product)), latency);
    }

    /// Number of times `call` has been invoked.
    pub fn call_count(&self, call: HostCall) -> u32 {
        self.calls[Self::slot(call)].load(Ordering::Relaxed)
    }

    fn slot(call: HostCall) -> usize {
        match call {
            HostCall::SelectedProductId => 0,
            HostCall::DeviceStatus => 1,
            HostCall::ChargeHistory => 2,
            HostCall::BatteryStats => 3,
        }
    }

    /// Count the call, apply latency, then apply any injected failure.
    async fn enter(&self, call: HostCall, product: Option<ProductId>) -> Result<()> {
        self.calls[Self::slot(call)].fetch_add(1, Ordering::Relaxed);

        let latency = {
            let latencies = self.latencies.read().await;
            product
                .and_then(|p| latencies.get(&(call, Some(p))).copied())
                .or_else(|| latencies.get(&(call, None)).copied())
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.failures.read().await.get(&call) {
            Some(message) => Err(BridgeError::Mock(message.clone())),
            None => Ok(()),
        }
    }

    async fn product(&self, call: HostCall, id: ProductId) -> Result<MockProduct> {
        self.enter(call, Some(id)).await?;
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| BridgeError::Host {
                call: call.name(),
                status: None,
                message: format!("unknown product {}", id),
            })
    }
}

#[async_trait]
impl HostBridge for MockBridge {
    async fn selected_product_id(&self) -> Result<Option<ProductId>> {
        self.enter(HostCall::SelectedProductId, None).await?;
        Ok(*self.selected.read().await)
    }

    async fn device_status(&self, product: ProductId) -> Result<Option<DeviceStatus>> {
        Ok(self.product(HostCall::DeviceStatus, product).await?.status)
    }

    async fn charge_history(&self, product: ProductId) -> Result<Vec<BatteryReading>> {
        Ok(self.product(HostCall::ChargeHistory, product).await?.history)
    }

    async fn battery_stats(&self, product: ProductId) -> Result<BatteryStats> {
        Ok(self.product(HostCall::BatteryStats, product).await?.stats)
    }
}
