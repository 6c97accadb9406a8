//! Error types for razermon-core.
//!
//! Every failure the viewer can observe is a rejected host-bridge call. The
//! worker logs these and turns them into failed view slots; nothing here is
//! ever shown to the user as an error message.
//!
//! | Error | Cause |
//! |-------|-------|
//! | [`BridgeError::NotReachable`] | The host process is not listening |
//! | [`BridgeError::Transport`] | Connection dropped, timeout, bad response framing |
//! | [`BridgeError::Host`] | The host answered the call with an error |
//! | [`BridgeError::Malformed`] | The host answered with JSON of the wrong shape |
//! | [`BridgeError::InvalidUrl`] | The configured host URL is unusable |
//!
//! There is no retry policy: a failed call stays failed until the next
//! refresh.

use thiserror::Error;

/// Errors returned by [`crate::HostBridge`] implementations.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BridgeError {
    /// The host is not reachable.
    #[cfg(feature = "http-bridge")]
    #[error("Host not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request failed.
    #[cfg(feature = "http-bridge")]
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid host URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The host rejected the call.
    #[error("{call} failed: {message}")]
    Host {
        call: &'static str,
        /// HTTP status, when the call went over HTTP.
        status: Option<u16>,
        message: String,
    },

    /// The host's answer could not be decoded.
    #[error("{call} returned a malformed result: {source}")]
    Malformed {
        call: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Injected failure from [`crate::MockBridge`].
    #[error("Mock failure: {0}")]
    Mock(String),
}

/// Result type alias using razermon-core's [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;
