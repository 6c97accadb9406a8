//! HTTP transport for the host bridge.
//!
//! Each host call is a `POST {base_url}/invoke/{call}` whose JSON body carries
//! the call's parameters (`{"productId": 122}` or `{}`). A 2xx response body
//! is the call's JSON result; anything else is a host-side rejection.
//!
//! # Example
//!
//! ```no_run
//! use razermon_core::{HostBridge, HttpBridge};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bridge = HttpBridge::new("http://localhost:1420")?;
//!
//! if let Some(product) = bridge.selected_product_id().await? {
//!     let history = bridge.charge_history(product).await?;
//!     println!("{} readings for product {}", history.len(), product);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use razermon_types::{BatteryReading, BatteryStats, DeviceStatus, ProductId};

use crate::bridge::{HostBridge, HostCall};
use crate::error::{BridgeError, Result};

/// Transport timeout used by [`HttpBridge::new`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters of the per-product calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductParams {
    product_id: ProductId,
}

/// Parameters of `selected_product_id`.
#[derive(Debug, Serialize)]
struct NoParams {}

/// HTTP client for the host process.
#[derive(Debug, Clone)]
pub struct HttpBridge {
    client: Client,
    base_url: String,
}

impl HttpBridge {
    /// Create a bridge with the default transport timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the host (e.g., "http://localhost:1420")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a bridge with a custom transport timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BridgeError::Transport)?;
        Self::with_client(base_url, client)
    }

    /// Create a bridge with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        // Normalize URL (remove trailing slash)
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BridgeError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for a host call.
    pub fn invoke_url(&self, call: HostCall) -> String {
        format!("{}/invoke/{}", self.base_url, call.name())
    }

    async fn invoke<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        call: HostCall,
        params: &P,
    ) -> Result<T> {
        let url = self.invoke_url(call);
        debug!(call = call.name(), url = %url, "Invoking host call");

        let response = self
            .client
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    BridgeError::NotReachable {
                        url: self.base_url.clone(),
                        source: e,
                    }
                } else {
                    BridgeError::Transport(e)
                }
            })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(BridgeError::Host {
                call: call.name(),
                status: Some(status.as_u16()),
                message: error_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        serde_json::from_slice(&body).map_err(|source| BridgeError::Malformed {
            call: call.name(),
            source,
        })
    }
}

/// Human-readable message from an error response body.
///
/// Prefers a JSON `{"error": "..."}` field and falls back to the raw text.
fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Some(message.to_string());
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl HostBridge for HttpBridge {
    async fn selected_product_id(&self) -> Result<Option<ProductId>> {
        let raw: Option<u32> = self
            .invoke(HostCall::SelectedProductId, &NoParams {})
            .await?;
        Ok(raw.and_then(ProductId::new))
    }

    async fn device_status(&self, product: ProductId) -> Result<Option<DeviceStatus>> {
        self.invoke(
            HostCall::DeviceStatus,
            &ProductParams {
                product_id: product,
            },
        )
        .await
    }

    async fn charge_history(&self, product: ProductId) -> Result<Vec<BatteryReading>> {
        self.invoke(
            HostCall::ChargeHistory,
            &ProductParams {
                product_id: product,
            },
        )
        .await
    }

    async fn battery_stats(&self, product: ProductId) -> Result<BatteryStats> {
        self.invoke(
            HostCall::BatteryStats,
            &ProductParams {
                product_id: product,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_creation() {
        let bridge = HttpBridge::new("http://localhost:1420");
        assert!(bridge.is_ok());

        let bridge = bridge.unwrap();
        assert_eq!(bridge.base_url(), "http://localhost:1420");
    }

    #[test]
    fn test_bridge_normalizes_url() {
        let bridge = HttpBridge::new("http://localhost:1420/").unwrap();
        assert_eq!(bridge.base_url(), "http://localhost:1420");
    }

    #[test]
    fn test_bridge_invalid_url() {
        let result = HttpBridge::new("localhost:1420");
        assert!(matches!(result, Err(BridgeError::InvalidUrl(_))));
    }

    #[test]
    fn test_invoke_url() {
        let bridge = HttpBridge::new("https://host.local/").unwrap();
        assert_eq!(
            bridge.invoke_url(HostCall::BatteryStats),
            "https://host.local/invoke/battery_stats"
        );
    }

    #[test]
    fn test_product_params_are_camel_case() {
        let params = ProductParams {
            product_id: ProductId::new(122).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"productId":122}"#
        );
        assert_eq!(serde_json::to_string(&NoParams {}).unwrap(), "{}");
    }

    #[test]
    fn test_error_message_prefers_json_field() {
        assert_eq!(
            error_message(br#"{"error":"no such device"}"#).as_deref(),
            Some("no such device")
        );
        assert_eq!(
            error_message(b"  database is locked \n").as_deref(),
            Some("database is locked")
        );
        assert_eq!(error_message(b""), None);
    }
}
