//! Error types for data parsing in razermon-types.

use thiserror::Error;

/// Errors that can occur when decoding host telemetry values.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// A `created_at` string did not match `yyyy-MM-dd HH:mm:ss`.
    #[error("Invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp { input: String, reason: String },

    /// An epoch value cannot be represented as a calendar date.
    #[error("Timestamp out of range: {0} ms")]
    OutOfRange(i64),
}

/// Result type alias using razermon-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
