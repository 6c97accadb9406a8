//! Timestamp codec for charge-history records.
//!
//! The host stores `created_at` as a SQLite `CURRENT_TIMESTAMP` string
//! (`yyyy-MM-dd HH:mm:ss`, always UTC). Charts and tooltips work in epoch
//! milliseconds and display `MM/dd HH:mm` in the viewer's local offset.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::{ParseError, ParseResult};

/// Format of `created_at` strings produced by the host.
const CREATED_AT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Format used for axis ticks and tooltips.
const CHART_LABEL_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month]/[day] [hour]:[minute]");

/// Parse a host `created_at` string as UTC and return epoch milliseconds.
///
/// # Examples
///
/// ```
/// use razermon_types::timestamp::parse_created_at;
///
/// assert_eq!(parse_created_at("1970-01-01 00:00:01").unwrap(), 1_000);
/// assert!(parse_created_at("yesterday").is_err());
/// ```
pub fn parse_created_at(input: &str) -> ParseResult<i64> {
    let parsed = PrimitiveDateTime::parse(input.trim(), CREATED_AT_FORMAT).map_err(|e| {
        ParseError::InvalidTimestamp {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(unix_millis(parsed.assume_utc()))
}

/// Format an instant the way the host stores `created_at` (UTC).
pub fn format_created_at(instant: OffsetDateTime) -> ParseResult<String> {
    let utc = instant
        .checked_to_offset(UtcOffset::UTC)
        .ok_or(ParseError::OutOfRange(unix_millis(instant)))?;
    utc.format(CREATED_AT_FORMAT)
        .map_err(|_| ParseError::OutOfRange(unix_millis(instant)))
}

/// Epoch milliseconds of an instant.
pub fn unix_millis(instant: OffsetDateTime) -> i64 {
    (instant.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Convert epoch milliseconds back to an instant.
pub fn from_unix_millis(millis: i64) -> ParseResult<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|_| ParseError::OutOfRange(millis))
}

/// Format epoch milliseconds as `MM/dd HH:mm` in the given offset.
///
/// # Examples
///
/// ```
/// use razermon_types::timestamp::format_chart_label;
/// use time::UtcOffset;
///
/// // 2024-03-01 12:00:00 UTC
/// let label = format_chart_label(1_709_294_400_000, UtcOffset::UTC).unwrap();
/// assert_eq!(label, "03/01 12:00");
/// ```
pub fn format_chart_label(millis: i64, offset: UtcOffset) -> ParseResult<String> {
    let local = from_unix_millis(millis)?
        .checked_to_offset(offset)
        .ok_or(ParseError::OutOfRange(millis))?;
    local
        .format(CHART_LABEL_FORMAT)
        .map_err(|_| ParseError::OutOfRange(millis))
}

/// The viewer's local UTC offset, falling back to UTC.
///
/// On Unix the offset can only be read safely while the process is
/// single-threaded, so call this before spawning worker threads and keep the
/// result.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_parse_created_at_is_utc() {
        let millis = parse_created_at("2024-03-01 12:00:00").unwrap();
        assert_eq!(millis, 1_709_294_400_000);
        assert_eq!(millis, unix_millis(datetime!(2024-03-01 12:00:00 UTC)));
    }

    #[test]
    fn test_format_created_at_converts_to_utc() {
        let instant = datetime!(2024-03-01 14:30:05 +2);
        assert_eq!(format_created_at(instant).unwrap(), "2024-03-01 12:30:05");
        assert_eq!(
            parse_created_at(&format_created_at(instant).unwrap()).unwrap(),
            unix_millis(instant)
        );
    }

    #[test]
    fn test_parse_created_at_trims_whitespace() {
        assert_eq!(
            parse_created_at(" 2024-03-01 12:00:00\n").unwrap(),
            1_709_294_400_000
        );
    }

    #[test]
    fn test_parse_created_at_rejects_other_formats() {
        for input in [
            "",
            "2024-03-01",
            "2024-03-01T12:00:00Z",
            "03/01/2024 12:00:00",
            "2024-13-01 12:00:00",
        ] {
            let err = parse_created_at(input).unwrap_err();
            assert!(matches!(err, ParseError::InvalidTimestamp { .. }), "{input}");
        }
    }

    #[test]
    fn test_parse_error_mentions_input() {
        let err = parse_created_at("not a date").unwrap_err();
        assert!(err.to_string().contains("not a date"));
    }

    #[test]
    fn test_format_chart_label_utc() {
        assert_eq!(
            format_chart_label(1_709_294_400_000, UtcOffset::UTC).unwrap(),
            "03/01 12:00"
        );
    }

    #[test]
    fn test_format_chart_label_applies_offset() {
        let offset = UtcOffset::from_hms(-5, 0, 0).unwrap();
        assert_eq!(
            format_chart_label(1_709_294_400_000, offset).unwrap(),
            "03/01 07:00"
        );
    }

    #[test]
    fn test_format_chart_label_truncates_seconds() {
        let millis = parse_created_at("2024-12-31 23:59:59").unwrap();
        assert_eq!(
            format_chart_label(millis, UtcOffset::UTC).unwrap(),
            "12/31 23:59"
        );
    }

    #[test]
    fn test_format_chart_label_out_of_range() {
        assert_eq!(
            format_chart_label(i64::MAX, UtcOffset::UTC),
            Err(ParseError::OutOfRange(i64::MAX))
        );
    }
}
