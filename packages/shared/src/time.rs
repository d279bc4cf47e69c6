//! Timestamp helpers.

use chrono::{DateTime, Utc};

/// Get the current Unix timestamp in milliseconds (UTC).
pub fn unix_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a Unix-millisecond timestamp as an RFC 3339 string (UTC).
///
/// Values outside the representable range render as the Unix epoch.
pub fn timestamp_ms_to_rfc3339(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339()
}
